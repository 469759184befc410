use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::services::CategoryService;
use crate::features::items::dtos::{CreateItemDto, ItemResponseDto, UpdateItemDto};
use crate::features::items::models::{specifications_column, Item};
use crate::shared::search::filter_by_term;

const ITEM_COLUMNS: &str = "id, name, description, category_id, price, image_url, \
                            specifications, is_active, created_at, updated_at";

/// Service for item operations
pub struct ItemService {
    pool: PgPool,
    categories: Arc<CategoryService>,
}

impl ItemService {
    pub fn new(pool: PgPool, categories: Arc<CategoryService>) -> Self {
        Self { pool, categories }
    }

    pub async fn create(&self, dto: CreateItemDto) -> Result<ItemResponseDto> {
        let query = format!(
            r#"
            INSERT INTO items (name, description, category_id, price, image_url, specifications, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            ITEM_COLUMNS
        );

        let item = sqlx::query_as::<_, Item>(&query)
            .bind(dto.name.trim())
            .bind(dto.description.as_deref().map(str::trim))
            .bind(dto.category_id)
            .bind(dto.price)
            .bind(dto.image_url.as_deref())
            .bind(specifications_column(dto.specifications))
            .bind(dto.is_active.unwrap_or(true))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create item: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Created item {} ({})", item.name, item.id);
        Ok(item.into())
    }

    pub async fn update(&self, id: Uuid, dto: UpdateItemDto) -> Result<ItemResponseDto> {
        let query = format!(
            r#"
            UPDATE items
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                category_id = COALESCE($3, category_id),
                price = COALESCE($4, price),
                image_url = COALESCE($5, image_url),
                specifications = CASE WHEN $6 THEN $7 ELSE specifications END,
                is_active = COALESCE($8, is_active),
                updated_at = NOW()
            WHERE id = $9
            RETURNING {}
            "#,
            ITEM_COLUMNS
        );

        let replace_specs = dto.specifications.is_some();

        let item = sqlx::query_as::<_, Item>(&query)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(dto.description.as_deref().map(str::trim))
            .bind(dto.category_id)
            .bind(dto.price)
            .bind(dto.image_url.as_deref())
            .bind(replace_specs)
            .bind(specifications_column(dto.specifications))
            .bind(dto.is_active)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update item {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Updated item {}", id);
        Ok(item.into())
    }

    /// Hard delete. Products keep the id in their `item_ids`.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete item {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Deleted item {}", id);
        Ok(())
    }

    /// Item with its category name
    pub async fn get_by_id(&self, id: Uuid) -> Result<ItemResponseDto> {
        let (item, names) = futures::try_join!(self.find(id), self.categories.names())?;
        let item = item.ok_or_else(|| not_found(id))?;
        Ok(ItemResponseDto::with_category(item, &names))
    }

    /// Newest first
    pub async fn list_all(&self) -> Result<Vec<Item>> {
        let query = format!(
            "SELECT {} FROM items ORDER BY created_at DESC",
            ITEM_COLUMNS
        );

        sqlx::query_as::<_, Item>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch items: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Every item with its category name; both tables are read concurrently
    pub async fn list_with_categories(&self) -> Result<Vec<ItemResponseDto>> {
        let (items, names) = futures::try_join!(self.list_all(), self.categories.names())?;

        Ok(items
            .into_iter()
            .map(|item| ItemResponseDto::with_category(item, &names))
            .collect())
    }

    pub async fn list_by_category(&self, category_id: Uuid) -> Result<Vec<ItemResponseDto>> {
        self.fetch_by_category(category_id, false).await
    }

    pub async fn list_active_by_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<ItemResponseDto>> {
        self.fetch_by_category(category_id, true).await
    }

    /// Existing items among `ids`; unknown ids are skipped
    pub async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT {} FROM items WHERE id = ANY($1) ORDER BY name ASC",
            ITEM_COLUMNS
        );

        sqlx::query_as::<_, Item>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch items by ids: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Case-insensitive match on name, description and category name
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<ItemResponseDto>> {
        let items = self.list_with_categories().await?;
        Ok(filter_by_term(items, term))
    }

    async fn find(&self, id: Uuid) -> Result<Option<Item>> {
        let query = format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS);

        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch item {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn fetch_by_category(
        &self,
        category_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<ItemResponseDto>> {
        let query = format!(
            r#"
            SELECT {}
            FROM items
            WHERE category_id = $1 AND ($2 = FALSE OR is_active = TRUE)
            ORDER BY name ASC
            "#,
            ITEM_COLUMNS
        );

        let items = sqlx::query_as::<_, Item>(&query)
            .bind(category_id)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch items for category {}: {:?}", category_id, e);
                AppError::Database(e)
            })?;

        Ok(items.into_iter().map(ItemResponseDto::from).collect())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Item with id {} not found", id))
}
