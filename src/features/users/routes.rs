use crate::features::users::handlers;
use crate::features::users::services::UserProfileService;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes(service: Arc<UserProfileService>) -> Router {
    Router::new()
        .route(
            "/api/me",
            get(handlers::get_profile).patch(handlers::update_profile),
        )
        .with_state(service)
}
