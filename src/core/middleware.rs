use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::JwtValidator;
use crate::features::users::models::UserProfile;
use crate::features::users::services::UserProfileService;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let provided = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok())
                .and_then(|value| value.strip_prefix("Basic "))
                .and_then(|encoded| BASE64_STANDARD.decode(encoded).ok())
                .and_then(|decoded| String::from_utf8(decoded).ok());

            if provided.as_deref() == Some(credentials.as_str()) {
                return Ok(next.run(req).await);
            }

            Err((
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")],
                "Unauthorized",
            )
                .into_response())
        })
    }
}

/// State shared by the bearer-token middleware
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<JwtValidator>,
    pub profiles: Arc<UserProfileService>,
}

/// Pull the token out of an `Authorization: Bearer <token>` header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// The users table is authoritative for the role; token role claims only count
/// for accounts without a profile row
pub fn apply_profile(
    mut user: AuthenticatedUser,
    profile: Option<UserProfile>,
) -> Result<AuthenticatedUser, AppError> {
    if let Some(profile) = profile {
        if !profile.is_active {
            return Err(AppError::Forbidden(
                "This account has been disabled.".to_string(),
            ));
        }
        user.assign_role(&profile.role);
    }
    Ok(user)
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = bearer_token(auth_header).ok_or_else(|| {
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    let user = state.validator.validate_token(token).await?;
    let profile = state.profiles.find_profile(&user.sub).await?;
    let user = apply_profile(user, profile)?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Bearer   "), None);
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("bearer abc"), None);
    }

    fn token_user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            account_id: "acc-1".to_string(),
            sub: "user-1".to_string(),
            session_uid: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn stored_profile(role: &str, is_active: bool) -> UserProfile {
        UserProfile {
            id: "user-1".to_string(),
            name: "Jane".to_string(),
            email: "jane@shop.io".to_string(),
            phone: None,
            address: None,
            role: role.to_string(),
            is_active,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_demoted_profile_overrides_admin_claim() {
        let user = apply_profile(token_user(&["admin"]), Some(stored_profile("customer", true)))
            .expect("active profile");
        assert!(!user.is_admin());
        assert_eq!(user.roles, vec!["customer".to_string()]);
    }

    #[test]
    fn test_profile_role_grants_admin() {
        let user = apply_profile(token_user(&[]), Some(stored_profile("admin", true)))
            .expect("active profile");
        assert!(user.is_admin());
    }

    #[test]
    fn test_token_roles_kept_without_profile() {
        let user = apply_profile(token_user(&["admin"]), None).expect("no profile");
        assert!(user.is_admin());
    }

    #[test]
    fn test_inactive_profile_is_forbidden() {
        let result = apply_profile(token_user(&["admin"]), Some(stored_profile("admin", false)));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let mut maker = MakeRequestUuid;
        let request = axum::http::Request::new(());
        let first = maker.make_request_id(&request).expect("request id");
        let second = maker.make_request_id(&request).expect("request id");
        assert_ne!(first.header_value(), second.header_value());
    }
}
