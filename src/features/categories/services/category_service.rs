use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::{Category, CategoryNames, CategoryWithCount};

const CATEGORY_COLUMNS: &str = "id, name, description, is_active, created_at, updated_at";

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let query = format!(
            r#"
            INSERT INTO categories (name, description, is_active)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(dto.name.trim())
            .bind(dto.description.as_deref().map(str::trim))
            .bind(dto.is_active.unwrap_or(true))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create category: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!("Created category {} ({})", category.name, category.id);
        Ok(category.into())
    }

    /// All categories by name, each with the number of items referencing it
    pub async fn list_with_item_counts(&self) -> Result<Vec<CategoryResponseDto>> {
        let rows = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            SELECT c.id, c.name, c.description, c.is_active, c.created_at, c.updated_at,
                   (SELECT COUNT(*) FROM items i WHERE i.category_id = c.id) AS item_count
            FROM categories c
            ORDER BY c.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(rows.into_iter().map(CategoryResponseDto::from).collect())
    }

    /// Active categories by name, for the storefront and catalog forms
    pub async fn list_active(&self) -> Result<Vec<CategoryResponseDto>> {
        let query = format!(
            "SELECT {} FROM categories WHERE is_active = TRUE ORDER BY name ASC",
            CATEGORY_COLUMNS
        );

        let categories = sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch active categories: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(categories.into_iter().map(CategoryResponseDto::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        self.find(id)
            .await?
            .map(CategoryResponseDto::from)
            .ok_or_else(|| not_found(id))
    }

    /// Same as `get_by_id` but hides inactive categories
    pub async fn get_active_by_id(&self, id: Uuid) -> Result<CategoryResponseDto> {
        self.find(id)
            .await?
            .filter(|c| c.is_active)
            .map(CategoryResponseDto::from)
            .ok_or_else(|| not_found(id))
    }

    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let query = format!(
            r#"
            UPDATE categories
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                is_active = COALESCE($3, is_active),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        let category = sqlx::query_as::<_, Category>(&query)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(dto.description.as_deref().map(str::trim))
            .bind(dto.is_active)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update category {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| not_found(id))?;

        tracing::info!("Updated category {}", id);
        Ok(category.into())
    }

    /// Hard delete. Items and products keep the now dangling id.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete category {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Deleted category {}", id);
        Ok(())
    }

    /// Name lookup over every category, active or not
    pub async fn names(&self) -> Result<CategoryNames> {
        let query = format!("SELECT {} FROM categories", CATEGORY_COLUMNS);

        let categories = sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch category names: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(categories.into())
    }

    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count categories: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find(&self, id: Uuid) -> Result<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch category {}: {:?}", id, e);
                AppError::Database(e)
            })
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Category with id {} not found", id))
}
