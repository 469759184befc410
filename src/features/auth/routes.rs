use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/refresh", post(handlers::refresh_token))
        .with_state(service)
}

/// Protected auth routes (require JWT authentication)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/me", get(handlers::get_me))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{AuthTokenConfig, LogtoM2MConfig};
    use crate::features::auth::clients::LogtoAuthClient;
    use crate::features::auth::services::TokenService;
    use crate::features::logto::LogtoTokenManager;
    use crate::features::users::services::UserProfileService;
    use crate::shared::test_helpers::lazy_pool;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    const UNREACHABLE: &str = "http://127.0.0.1:1";

    fn service() -> Arc<AuthService> {
        let token_manager = Arc::new(LogtoTokenManager::new(LogtoM2MConfig {
            client_id: "m2m".to_string(),
            client_secret: "secret".to_string(),
            resource: "https://default.logto.app/api".to_string(),
            scope: "all".to_string(),
            token_url: format!("{}/oidc/token", UNREACHABLE),
            api_base_url: UNREACHABLE.to_string(),
        }));
        let token_service = Arc::new(TokenService::new(
            AuthTokenConfig {
                oidc_token_url: format!("{}/oidc/token", UNREACHABLE),
                token_exchange_app_id: "app".to_string(),
                token_exchange_app_secret: "secret".to_string(),
                api_resource: "https://api.storefront".to_string(),
                token_scopes: "openid offline_access".to_string(),
            },
            token_manager.clone(),
        ));

        Arc::new(AuthService::new(
            Arc::new(LogtoAuthClient::new(token_manager)),
            token_service,
            Arc::new(UserProfileService::new(lazy_pool())),
            "customer".to_string(),
        ))
    }

    #[tokio::test]
    async fn test_register_validation_runs_before_identity_provider() {
        let server = TestServer::new(public_routes(service())).unwrap();

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "name": "",
                "email": "nobody",
                "password": "123"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 3);
    }

    #[tokio::test]
    async fn test_login_rejects_malformed_email() {
        let server = TestServer::new(public_routes(service())).unwrap();

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "email": "jane@", "password": "secret" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["errors"][0], "email: The email address is invalid.");
    }

    #[tokio::test]
    async fn test_login_rejects_short_password() {
        let server = TestServer::new(public_routes(service())).unwrap();

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "email": "jane@shop.io", "password": "12345" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(
            body["errors"][0],
            "password: Password must be at least 6 characters"
        );
    }

    #[tokio::test]
    async fn test_me_requires_authentication() {
        let server = TestServer::new(protected_routes(service())).unwrap();

        server
            .get("/api/auth/me")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
