use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::items::dtos::{CreateItemDto, ItemLookupDto, ItemResponseDto, UpdateItemDto};
use crate::features::items::services::ItemService;
use crate::shared::types::{ApiResponse, DeleteQuery, ListQuery, Meta};

/// List items with category names, newest first
#[utoipa::path(
    get,
    path = "/api/admin/items",
    params(ListQuery),
    responses(
        (status = 200, description = "Items", body = ApiResponse<Vec<ItemResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin-items",
    security(("bearer_auth" = []))
)]
pub async fn list_items(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ItemService>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    let items = service.search(query.search.as_deref()).await?;
    let (page, total) = query.pagination().paginate(items);

    Ok(Json(ApiResponse::success(
        Some(page),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin/items",
    request_body = CreateItemDto,
    responses(
        (status = 201, description = "Item created", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin-items",
    security(("bearer_auth" = []))
)]
pub async fn create_item(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ItemService>>,
    AppJson(dto): AppJson<CreateItemDto>,
) -> Result<(StatusCode, Json<ApiResponse<ItemResponseDto>>)> {
    dto.validate()?;

    let item = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(item),
            Some("Item created".to_string()),
            None,
        )),
    ))
}

/// Resolve a set of item ids; unknown ids are left out of the result
#[utoipa::path(
    post,
    path = "/api/admin/items/lookup",
    request_body = ItemLookupDto,
    responses(
        (status = 200, description = "Items that exist", body = ApiResponse<Vec<ItemResponseDto>>),
        (status = 400, description = "Validation error")
    ),
    tag = "admin-items",
    security(("bearer_auth" = []))
)]
pub async fn lookup_items(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ItemService>>,
    AppJson(dto): AppJson<ItemLookupDto>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    dto.validate()?;

    let items: Vec<ItemResponseDto> = service
        .get_by_ids(&dto.ids)
        .await?
        .into_iter()
        .map(ItemResponseDto::from)
        .collect();
    let total = items.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/items/{id}",
    params(("id" = Uuid, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item found", body = ApiResponse<ItemResponseDto>),
        (status = 404, description = "Item not found")
    ),
    tag = "admin-items",
    security(("bearer_auth" = []))
)]
pub async fn get_item(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ItemService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let item = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(item), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/admin/items/{id}",
    params(("id" = Uuid, Path, description = "Item ID")),
    request_body = UpdateItemDto,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Item not found")
    ),
    tag = "admin-items",
    security(("bearer_auth" = []))
)]
pub async fn update_item(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ItemService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateItemDto>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    dto.validate()?;

    let item = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(item),
        Some("Item updated".to_string()),
        None,
    )))
}

/// Delete an item. Products that bundle it keep the dangling id.
#[utoipa::path(
    delete,
    path = "/api/admin/items/{id}",
    params(("id" = Uuid, Path, description = "Item ID"), DeleteQuery),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 400, description = "Deletion not confirmed"),
        (status = 404, description = "Item not found")
    ),
    tag = "admin-items",
    security(("bearer_auth" = []))
)]
pub async fn delete_item(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ItemService>>,
    Path(id): Path<Uuid>,
    AppQuery(query): AppQuery<DeleteQuery>,
) -> Result<Json<ApiResponse<()>>> {
    query.require_confirmation()?;

    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Item deleted".to_string()),
        None,
    )))
}

/// All items of a category, by name
#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}/items",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Items in the category", body = ApiResponse<Vec<ItemResponseDto>>)
    ),
    tag = "admin-items",
    security(("bearer_auth" = []))
)]
pub async fn list_category_items(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ItemService>>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    let items = service.list_by_category(category_id).await?;
    let total = items.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}
