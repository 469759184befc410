use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::{Category, CategoryWithCount};
use crate::shared::search::Searchable;
use crate::shared::validation::{validate_category_name, validate_not_blank};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    /// Only present on admin listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            is_active: c.is_active,
            item_count: None,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl From<CategoryWithCount> for CategoryResponseDto {
    fn from(row: CategoryWithCount) -> Self {
        Self {
            item_count: Some(row.item_count),
            ..row.category.into()
        }
    }
}

impl Searchable for CategoryResponseDto {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(&self.name), self.description.as_deref()]
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(
        custom(function = "validate_not_blank", message = "Category name is required"),
        custom(function = "validate_category_name")
    )]
    pub name: String,

    #[validate(length(max = 200, message = "Description must not exceed 200 characters"))]
    pub description: Option<String>,

    /// Defaults to true
    pub is_active: Option<bool>,
}

/// Partial update; absent fields keep their value
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(
        custom(function = "validate_not_blank", message = "Category name is required"),
        custom(function = "validate_category_name")
    )]
    pub name: Option<String>,

    #[validate(length(max = 200, message = "Description must not exceed 200 characters"))]
    pub description: Option<String>,

    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str) -> CreateCategoryDto {
        CreateCategoryDto {
            name: name.to_string(),
            description: None,
            is_active: None,
        }
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(create("A").validate().is_err());
        assert!(create("TV").validate().is_ok());
        assert!(create(&"x".repeat(50)).validate().is_ok());
        assert!(create(&"x".repeat(51)).validate().is_err());
    }

    #[test]
    fn test_name_length_ignores_surrounding_whitespace() {
        assert!(create(" a").validate().is_err());
        assert!(create("  a  ").validate().is_err());
        assert!(create(" TV ").validate().is_ok());

        let dto = UpdateCategoryDto {
            name: Some(" a".to_string()),
            description: None,
            is_active: None,
        };
        let errors = dto.validate().unwrap_err();
        let message = errors.field_errors()["name"][0]
            .message
            .as_ref()
            .map(|m| m.to_string());
        assert_eq!(
            message.as_deref(),
            Some("Category name must be 2-50 characters")
        );
    }

    #[test]
    fn test_empty_name_is_required_error() {
        let errors = create("").validate().unwrap_err();
        let messages: Vec<String> = errors.field_errors()["name"]
            .iter()
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect();
        assert!(messages.contains(&"Category name is required".to_string()));
    }

    #[test]
    fn test_description_limit() {
        let mut dto = create("Books");
        dto.description = Some("d".repeat(201));
        assert!(dto.validate().is_err());
        dto.description = Some("d".repeat(200));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_empty_update_is_valid() {
        let dto = UpdateCategoryDto {
            name: None,
            description: None,
            is_active: Some(false),
        };
        assert!(dto.validate().is_ok());
    }
}
