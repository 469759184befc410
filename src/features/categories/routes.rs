use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers::{admin_category_handler, category_handler};
use crate::features::categories::services::CategoryService;

/// Storefront routes (no authentication required)
pub fn public_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(category_handler::list_categories))
        .route("/api/categories/{id}", get(category_handler::get_category))
        .with_state(service)
}

/// Catalog management routes (admin role required)
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/admin/categories",
            get(admin_category_handler::list_categories)
                .post(admin_category_handler::create_category),
        )
        .route(
            "/api/admin/categories/{id}",
            get(admin_category_handler::get_category)
                .put(admin_category_handler::update_category)
                .delete(admin_category_handler::delete_category),
        )
        .with_state(service)
}
