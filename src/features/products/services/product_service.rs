use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::services::CategoryService;
use crate::features::items::dtos::ItemResponseDto;
use crate::features::items::services::ItemService;
use crate::features::products::dtos::{CreateProductDto, ProductResponseDto, UpdateProductDto};
use crate::features::products::models::{generate_sku, Product};
use crate::shared::search::filter_by_term;

const PRODUCT_COLUMNS: &str = "id, name, description, price, stock, sku, category_id, \
                               image_url, item_ids, is_active, created_at, updated_at";

/// Service for product operations
pub struct ProductService {
    pool: PgPool,
    categories: Arc<CategoryService>,
    items: Arc<ItemService>,
}

impl ProductService {
    pub fn new(pool: PgPool, categories: Arc<CategoryService>, items: Arc<ItemService>) -> Self {
        Self {
            pool,
            categories,
            items,
        }
    }

    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductResponseDto> {
        let sku = match dto.sku.as_deref().map(str::trim) {
            Some(sku) if !sku.is_empty() => sku.to_string(),
            _ => generate_sku(&dto.name, Utc::now()),
        };

        let query = format!(
            r#"
            INSERT INTO products (name, description, price, stock, sku, category_id, image_url, item_ids, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(dto.name.trim())
            .bind(dto.description.trim())
            .bind(dto.price)
            .bind(dto.stock)
            .bind(&sku)
            .bind(dto.category_id)
            .bind(dto.image_url.as_deref())
            .bind(&dto.item_ids)
            .bind(dto.is_active.unwrap_or(true))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create product: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Created product {} ({})", product.sku, product.id);
        Ok(product.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateProductDto) -> Result<ProductResponseDto> {
        let query = format!(
            r#"
            UPDATE products
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                price = COALESCE($3, price),
                stock = COALESCE($4, stock),
                sku = COALESCE($5, sku),
                category_id = COALESCE($6, category_id),
                image_url = COALESCE($7, image_url),
                item_ids = COALESCE($8, item_ids),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $10
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        let product = sqlx::query_as::<_, Product>(&query)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(dto.description.as_deref().map(str::trim))
            .bind(dto.price)
            .bind(dto.stock)
            .bind(dto.sku.as_deref().map(str::trim))
            .bind(dto.category_id)
            .bind(dto.image_url.as_deref())
            .bind(dto.item_ids.as_deref())
            .bind(dto.is_active)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update product {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Updated product {}", id);
        Ok(product.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete product {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Deleted product {}", id);
        Ok(())
    }

    /// Detail view with category name and resolved items
    pub async fn get_by_id(&self, id: Uuid) -> Result<ProductResponseDto> {
        let (product, names) = futures::try_join!(self.find(id), self.categories.names())?;
        let product = product.ok_or_else(|| not_found(id))?;

        let items = self.resolve_items(&product.item_ids).await?;
        Ok(ProductResponseDto::with_category(product, &names).with_items(&items))
    }

    /// Same as `get_by_id` but hides inactive products
    pub async fn get_active_by_id(&self, id: Uuid) -> Result<ProductResponseDto> {
        let product = self.get_by_id(id).await?;
        if !product.is_active {
            return Err(not_found(id));
        }
        Ok(product)
    }

    /// Newest first
    pub async fn list_all(&self) -> Result<Vec<Product>> {
        let query = format!(
            "SELECT {} FROM products ORDER BY created_at DESC",
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, Product>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch products: {:?}", e);
                AppError::Database(e)
            })
    }

    pub async fn list_with_categories(&self) -> Result<Vec<ProductResponseDto>> {
        let (products, names) = futures::try_join!(self.list_all(), self.categories.names())?;

        Ok(products
            .into_iter()
            .map(|p| ProductResponseDto::with_category(p, &names))
            .collect())
    }

    /// Products with category names and their items; the three tables are read concurrently
    pub async fn list_with_categories_and_items(&self) -> Result<Vec<ProductResponseDto>> {
        let (products, names, items) = futures::try_join!(
            self.list_all(),
            self.categories.names(),
            self.items.list_all()
        )?;

        let items: Vec<ItemResponseDto> = items.into_iter().map(ItemResponseDto::from).collect();

        Ok(products
            .into_iter()
            .map(|p| ProductResponseDto::with_category(p, &names).with_items(&items))
            .collect())
    }

    pub async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<ProductResponseDto>> {
        let query = format!(
            "SELECT {} FROM products WHERE category_id = $1 ORDER BY name ASC",
            PRODUCT_COLUMNS
        );

        let products = sqlx::query_as::<_, Product>(&query)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch products for category {}: {:?}", category_id, e);
                AppError::Database(e)
            })?;

        Ok(products.into_iter().map(ProductResponseDto::from).collect())
    }

    /// Case-insensitive match on name, description, category name and SKU
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<ProductResponseDto>> {
        let products = self.list_with_categories_and_items().await?;
        Ok(filter_by_term(products, term))
    }

    /// Active products for the storefront, optionally narrowed to one category
    pub async fn list_storefront(
        &self,
        category_id: Option<Uuid>,
        term: Option<&str>,
    ) -> Result<Vec<ProductResponseDto>> {
        let products = self
            .list_with_categories()
            .await?
            .into_iter()
            .filter(|p| p.is_active)
            .filter(|p| category_id.is_none_or(|id| p.category_id == id))
            .collect();

        Ok(filter_by_term(products, term))
    }

    async fn find(&self, id: Uuid) -> Result<Option<Product>> {
        let query = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);

        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch product {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn resolve_items(&self, ids: &[Uuid]) -> Result<Vec<ItemResponseDto>> {
        Ok(self
            .items
            .get_by_ids(ids)
            .await?
            .into_iter()
            .map(ItemResponseDto::from)
            .collect())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Product with id {} not found", id))
}
