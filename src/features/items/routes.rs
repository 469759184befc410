use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::items::handlers::{admin_item_handler, item_handler};
use crate::features::items::services::ItemService;

/// Storefront routes (no authentication required)
pub fn public_routes(service: Arc<ItemService>) -> Router {
    Router::new()
        .route("/api/items", get(item_handler::list_items))
        .with_state(service)
}

/// Catalog management routes (admin role required)
pub fn admin_routes(service: Arc<ItemService>) -> Router {
    Router::new()
        .route(
            "/api/admin/items",
            get(admin_item_handler::list_items).post(admin_item_handler::create_item),
        )
        .route(
            "/api/admin/items/lookup",
            post(admin_item_handler::lookup_items),
        )
        .route(
            "/api/admin/items/{id}",
            get(admin_item_handler::get_item)
                .put(admin_item_handler::update_item)
                .delete(admin_item_handler::delete_item),
        )
        .route(
            "/api/admin/categories/{id}/items",
            get(admin_item_handler::list_category_items),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::services::CategoryService;
    use crate::shared::test_helpers::{lazy_pool, with_admin_auth, with_customer_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use uuid::Uuid;

    fn service() -> Arc<ItemService> {
        let pool = lazy_pool();
        Arc::new(ItemService::new(
            pool.clone(),
            Arc::new(CategoryService::new(pool)),
        ))
    }

    #[tokio::test]
    async fn test_public_listing_requires_category_id() {
        let server = TestServer::new(public_routes(service())).unwrap();

        let response = server.get("/api/items").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .get("/api/items")
            .add_query_param("category_id", "not-a-uuid")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_customers_cannot_manage_items() {
        let server = TestServer::new(with_customer_auth(admin_routes(service()))).unwrap();

        server
            .get("/api/admin/items")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_fields() {
        let server = TestServer::new(with_admin_auth(admin_routes(service()))).unwrap();

        let response = server
            .post("/api/admin/items")
            .json(&json!({
                "name": "X",
                "category_id": Uuid::new_v4(),
                "price": "0",
                "image_url": "https://cdn.shop.io/x.txt",
                "specifications": { "": "value" }
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        let errors: Vec<String> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e.as_str().unwrap().to_string())
            .collect();
        assert!(errors.iter().any(|e| e.starts_with("image_url:")));
        assert!(errors.iter().any(|e| e.starts_with("name:")));
        assert!(errors.iter().any(|e| e.starts_with("price:")));
        assert!(errors.iter().any(|e| e.starts_with("specifications:")));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let server = TestServer::new(with_admin_auth(admin_routes(service()))).unwrap();

        server
            .delete(&format!("/api/admin/items/{}", Uuid::new_v4()))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_lookup_skips_the_database() {
        let server = TestServer::new(with_admin_auth(admin_routes(service()))).unwrap();

        let response = server
            .post("/api/admin/items/lookup")
            .json(&json!({ "ids": [] }))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["meta"]["total"], 0);
    }
}
