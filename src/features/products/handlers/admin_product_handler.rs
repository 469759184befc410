use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::products::dtos::{
    CreateProductDto, ProductResponseDto, SkuQuery, SkuResponseDto, UpdateProductDto,
};
use crate::features::products::models::generate_sku;
use crate::features::products::services::ProductService;
use crate::shared::types::{ApiResponse, DeleteQuery, ListQuery, Meta};

/// List products with category names and items, newest first
#[utoipa::path(
    get,
    path = "/api/admin/products",
    params(ListQuery),
    responses(
        (status = 200, description = "Products", body = ApiResponse<Vec<ProductResponseDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin-products",
    security(("bearer_auth" = []))
)]
pub async fn list_products(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let products = service.search(query.search.as_deref()).await?;
    let (page, total) = query.pagination().paginate(products);

    Ok(Json(ApiResponse::success(
        Some(page),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductDto,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin access required")
    ),
    tag = "admin-products",
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    AppJson(dto): AppJson<CreateProductDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProductResponseDto>>)> {
    dto.validate()?;

    let product = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(product),
            Some("Product created".to_string()),
            None,
        )),
    ))
}

/// Suggest a SKU for a product name
#[utoipa::path(
    get,
    path = "/api/admin/products/sku",
    params(SkuQuery),
    responses(
        (status = 200, description = "Generated SKU", body = ApiResponse<SkuResponseDto>)
    ),
    tag = "admin-products",
    security(("bearer_auth" = []))
)]
pub async fn suggest_sku(
    RequireAdmin(_user): RequireAdmin,
    AppQuery(query): AppQuery<SkuQuery>,
) -> Result<Json<ApiResponse<SkuResponseDto>>> {
    let sku = generate_sku(&query.name, Utc::now());
    Ok(Json(ApiResponse::success(
        Some(SkuResponseDto { sku }),
        None,
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponseDto>),
        (status = 404, description = "Product not found")
    ),
    tag = "admin-products",
    security(("bearer_auth" = []))
)]
pub async fn get_product(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    let product = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(product), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductDto,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin-products",
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateProductDto>,
) -> Result<Json<ApiResponse<ProductResponseDto>>> {
    dto.validate()?;

    let product = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(product),
        Some("Product updated".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID"), DeleteQuery),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 400, description = "Deletion not confirmed"),
        (status = 404, description = "Product not found")
    ),
    tag = "admin-products",
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(id): Path<Uuid>,
    AppQuery(query): AppQuery<DeleteQuery>,
) -> Result<Json<ApiResponse<()>>> {
    query.require_confirmation()?;

    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Product deleted".to_string()),
        None,
    )))
}

/// All products of a category, by name
#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}/products",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Products in the category", body = ApiResponse<Vec<ProductResponseDto>>)
    ),
    tag = "admin-products",
    security(("bearer_auth" = []))
)]
pub async fn list_category_products(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ProductService>>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ProductResponseDto>>>> {
    let products = service.list_by_category(category_id).await?;
    let total = products.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(products),
        None,
        Some(Meta { total }),
    )))
}
