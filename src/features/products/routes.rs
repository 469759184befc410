use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::products::handlers::{admin_product_handler, product_handler};
use crate::features::products::services::ProductService;

/// Storefront routes (no authentication required)
pub fn public_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route("/api/products", get(product_handler::list_products))
        .route("/api/products/{id}", get(product_handler::get_product))
        .with_state(service)
}

/// Catalog management routes (admin role required)
pub fn admin_routes(service: Arc<ProductService>) -> Router {
    Router::new()
        .route(
            "/api/admin/products",
            get(admin_product_handler::list_products).post(admin_product_handler::create_product),
        )
        .route(
            "/api/admin/products/sku",
            get(admin_product_handler::suggest_sku),
        )
        .route(
            "/api/admin/products/{id}",
            get(admin_product_handler::get_product)
                .put(admin_product_handler::update_product)
                .delete(admin_product_handler::delete_product),
        )
        .route(
            "/api/admin/categories/{id}/products",
            get(admin_product_handler::list_category_products),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::services::CategoryService;
    use crate::features::items::services::ItemService;
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth, with_customer_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use uuid::Uuid;

    fn admin_app() -> Router {
        let pool = lazy_pool();
        let categories = Arc::new(CategoryService::new(pool.clone()));
        let items = Arc::new(ItemService::new(pool.clone(), categories.clone()));
        admin_routes(Arc::new(ProductService::new(pool, categories, items)))
    }

    #[tokio::test]
    async fn test_sku_suggestion_uses_name_prefix() {
        let server = TestServer::new(with_admin_auth(admin_app())).unwrap();

        let response = server
            .get("/api/admin/products/sku")
            .add_query_param("name", "macbook air")
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let sku = body["data"]["sku"].as_str().unwrap();
        assert!(sku.starts_with("MAC"));
        assert_eq!(sku.len(), 9);
        assert!(sku[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_sku_suggestion_is_admin_only() {
        let server = TestServer::new(with_customer_auth(admin_app())).unwrap();

        server
            .get("/api/admin/products/sku")
            .add_query_param("name", "macbook")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_negative_stock_is_rejected() {
        let server = TestServer::new(with_admin_auth(admin_app())).unwrap();

        let response = server
            .post("/api/admin/products")
            .json(&json!({
                "name": "Smart Garden Kit",
                "description": "Indoor herb garden with LED lights",
                "price": "199.99",
                "stock": -1,
                "category_id": Uuid::new_v4()
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["errors"][0], "stock: Stock cannot be negative");
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let server = TestServer::new(with_admin_auth(admin_app())).unwrap();

        server
            .delete(&format!("/api/admin/products/{}", Uuid::new_v4()))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
