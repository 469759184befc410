use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::sample_data::handlers;
use crate::features::sample_data::services::SampleDataService;

pub fn routes(service: Arc<SampleDataService>) -> Router {
    Router::new()
        .route(
            "/api/admin/sample-data",
            post(handlers::generate_sample_data),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::services::CategoryService;
    use crate::features::items::services::ItemService;
    use crate::features::products::services::ProductService;
    use crate::shared::test_helpers::{lazy_pool, with_customer_auth};
    use axum::http::StatusCode;
    use axum_test::TestServer;

    fn app() -> Router {
        let pool = lazy_pool();
        let categories = Arc::new(CategoryService::new(pool.clone()));
        let items = Arc::new(ItemService::new(pool.clone(), categories.clone()));
        let products = Arc::new(ProductService::new(pool, categories.clone(), items));
        routes(Arc::new(SampleDataService::new(categories, products)))
    }

    #[tokio::test]
    async fn test_sample_data_is_admin_only() {
        let server = TestServer::new(app()).unwrap();
        server
            .post("/api/admin/sample-data")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        let server = TestServer::new(with_customer_auth(app())).unwrap();
        server
            .post("/api/admin/sample-data")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
