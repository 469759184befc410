use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{UpdateProfileDto, UserProfileDto};
use crate::features::users::services::UserProfileService;
use crate::shared::types::ApiResponse;

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Profile retrieved", body = ApiResponse<UserProfileDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile for this account")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<UserProfileService>>,
) -> Result<Json<ApiResponse<UserProfileDto>>> {
    let profile = service.get_profile(&user.sub).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

/// Update name, phone or address
#[utoipa::path(
    patch,
    path = "/api/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserProfileDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile for this account")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<UserProfileService>>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<UserProfileDto>>> {
    dto.validate()?;

    let profile = service.update_profile(&user.sub, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Profile updated".to_string()),
        None,
    )))
}
