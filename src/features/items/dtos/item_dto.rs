use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::CategoryNames;
use crate::features::items::models::{Item, Specifications};
use crate::shared::search::Searchable;
use crate::shared::validation::{
    validate_catalog_name, validate_item_price, validate_not_blank, validate_specifications,
    ITEM_IMAGE_URL_REGEX,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    /// Present on denormalized listings; "Uncategorized" for unknown ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub specifications: Specifications,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponseDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            category_id: item.category_id,
            category_name: None,
            price: item.price,
            image_url: item.image_url,
            specifications: item.specifications.map(|s| s.0).unwrap_or_default(),
            is_active: item.is_active,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl ItemResponseDto {
    pub fn with_category(item: Item, names: &CategoryNames) -> Self {
        let category_name = names.name_for(&item.category_id).to_string();
        Self {
            category_name: Some(category_name),
            ..item.into()
        }
    }
}

impl Searchable for ItemResponseDto {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(&self.name),
            self.description.as_deref(),
            self.category_name.as_deref(),
        ]
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemDto {
    #[validate(
        custom(function = "validate_not_blank", message = "Item name is required"),
        custom(
            function = "validate_catalog_name",
            message = "Item name must be 2-100 characters"
        )
    )]
    pub name: String,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    pub category_id: Uuid,

    #[validate(custom(function = "validate_item_price"))]
    pub price: Option<Decimal>,

    #[validate(regex(
        path = *ITEM_IMAGE_URL_REGEX,
        message = "Image URL must link to a jpg, jpeg, png, gif or webp file"
    ))]
    pub image_url: Option<String>,

    #[validate(custom(function = "validate_specifications"))]
    pub specifications: Option<Specifications>,

    /// Defaults to true
    pub is_active: Option<bool>,
}

/// Partial update. Sending `specifications: {}` clears them.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateItemDto {
    #[validate(
        custom(function = "validate_not_blank", message = "Item name is required"),
        custom(
            function = "validate_catalog_name",
            message = "Item name must be 2-100 characters"
        )
    )]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(custom(function = "validate_item_price"))]
    pub price: Option<Decimal>,

    #[validate(regex(
        path = *ITEM_IMAGE_URL_REGEX,
        message = "Image URL must link to a jpg, jpeg, png, gif or webp file"
    ))]
    pub image_url: Option<String>,

    #[validate(custom(function = "validate_specifications"))]
    pub specifications: Option<Specifications>,

    pub is_active: Option<bool>,
}

/// Body of `POST /api/admin/items/lookup`
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ItemLookupDto {
    #[validate(length(max = 100, message = "At most 100 ids per lookup"))]
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ItemCategoryQuery {
    pub category_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create() -> CreateItemDto {
        CreateItemDto {
            name: "USB-C Cable".to_string(),
            description: None,
            category_id: Uuid::new_v4(),
            price: None,
            image_url: None,
            specifications: None,
            is_active: None,
        }
    }

    fn price(value: &str) -> Option<Decimal> {
        Some(Decimal::from_str(value).unwrap())
    }

    #[test]
    fn test_minimal_item_is_valid() {
        assert!(create().validate().is_ok());
    }

    #[test]
    fn test_name_is_measured_without_padding() {
        let mut dto = create();
        dto.name = " a ".to_string();
        assert!(dto.validate().is_err());
        dto.name = " ab ".to_string();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_price_range() {
        let mut dto = create();
        dto.price = price("0.00");
        assert!(dto.validate().is_err());
        dto.price = price("0.01");
        assert!(dto.validate().is_ok());
        dto.price = price("999999");
        assert!(dto.validate().is_ok());
        dto.price = price("999999.01");
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_image_url_must_point_at_an_image() {
        let mut dto = create();
        dto.image_url = Some("https://cdn.shop.io/cable.PNG".to_string());
        assert!(dto.validate().is_ok());
        dto.image_url = Some("https://cdn.shop.io/cable".to_string());
        assert!(dto.validate().is_err());
        dto.image_url = Some("ftp://cdn.shop.io/cable.png".to_string());
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_specification_entries_need_key_and_value() {
        let mut dto = create();
        dto.specifications = Some(Specifications::from([(
            "Length".to_string(),
            "".to_string(),
        )]));
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("specifications"));
    }

    #[test]
    fn test_with_category_falls_back_to_uncategorized() {
        let item = Item {
            id: Uuid::new_v4(),
            name: "Cable".to_string(),
            description: None,
            category_id: Uuid::new_v4(),
            price: None,
            image_url: None,
            specifications: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let dto = ItemResponseDto::with_category(item, &CategoryNames::default());
        assert_eq!(dto.category_name.as_deref(), Some("Uncategorized"));
        assert!(dto.specifications.is_empty());
    }
}
