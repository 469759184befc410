use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::items::dtos::{ItemCategoryQuery, ItemResponseDto};
use crate::features::items::services::ItemService;
use crate::shared::types::{ApiResponse, Meta};

/// Active items of a category, by name
#[utoipa::path(
    get,
    path = "/api/items",
    params(ItemCategoryQuery),
    responses(
        (status = 200, description = "Active items in the category", body = ApiResponse<Vec<ItemResponseDto>>),
        (status = 400, description = "Missing or malformed category_id")
    ),
    tag = "items"
)]
pub async fn list_items(
    State(service): State<Arc<ItemService>>,
    AppQuery(query): AppQuery<ItemCategoryQuery>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    let items = service.list_active_by_category(query.category_id).await?;
    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}
