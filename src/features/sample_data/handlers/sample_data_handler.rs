use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::sample_data::dtos::SampleDataReportDto;
use crate::features::sample_data::services::SampleDataService;
use crate::shared::types::ApiResponse;

/// Insert the demo categories and products
#[utoipa::path(
    post,
    path = "/api/admin/sample-data",
    responses(
        (status = 201, description = "Sample data generated", body = ApiResponse<SampleDataReportDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin-sample-data",
    security(("bearer_auth" = []))
)]
pub async fn generate_sample_data(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<SampleDataService>>,
) -> Result<(StatusCode, Json<ApiResponse<SampleDataReportDto>>)> {
    tracing::info!("Sample data requested by {}", user.sub);

    let report = service.generate().await;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report),
            Some("Sample data generated".to_string()),
            None,
        )),
    ))
}
