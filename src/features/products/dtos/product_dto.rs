use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::CategoryNames;
use crate::features::items::dtos::ItemResponseDto;
use crate::features::products::models::{Product, StockStatus};
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::shared::search::Searchable;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::{
    validate_catalog_name, validate_not_blank, validate_product_description, validate_product_price,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub stock_status: StockStatus,
    pub sku: String,
    pub category_id: Uuid,
    /// Present on denormalized views; "Uncategorized" for unknown ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub image_url: Option<String>,
    pub item_ids: Vec<Uuid>,
    /// Resolved items; ids that no longer exist are dropped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ItemResponseDto>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponseDto {
    fn from(p: Product) -> Self {
        Self {
            stock_status: StockStatus::from_stock(p.stock),
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            stock: p.stock,
            sku: p.sku,
            category_id: p.category_id,
            category_name: None,
            image_url: p.image_url,
            item_ids: p.item_ids,
            items: None,
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl ProductResponseDto {
    pub fn with_category(product: Product, names: &CategoryNames) -> Self {
        let category_name = names.name_for(&product.category_id).to_string();
        Self {
            category_name: Some(category_name),
            ..product.into()
        }
    }

    /// Attach the items listed in `item_ids`, keeping that order
    pub fn with_items(mut self, catalog: &[ItemResponseDto]) -> Self {
        let items = self
            .item_ids
            .iter()
            .filter_map(|id| catalog.iter().find(|item| item.id == *id).cloned())
            .collect();
        self.items = Some(items);
        self
    }
}

impl Searchable for ProductResponseDto {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(&self.name),
            Some(&self.description),
            self.category_name.as_deref(),
            Some(&self.sku),
        ]
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(
        custom(function = "validate_not_blank", message = "Product name is required"),
        custom(
            function = "validate_catalog_name",
            message = "Product name must be 2-100 characters"
        )
    )]
    pub name: String,

    #[validate(
        custom(function = "validate_not_blank", message = "Description is required"),
        custom(function = "validate_product_description")
    )]
    pub description: String,

    #[validate(custom(function = "validate_product_price"))]
    pub price: Decimal,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    /// Generated from the name when missing or blank
    #[validate(length(max = 50, message = "SKU must not exceed 50 characters"))]
    pub sku: Option<String>,

    pub category_id: Uuid,

    #[validate(url(message = "Please enter a valid image URL"))]
    pub image_url: Option<String>,

    #[serde(default)]
    pub item_ids: Vec<Uuid>,

    /// Defaults to true
    pub is_active: Option<bool>,
}

/// Partial update; absent fields keep their value
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(
        custom(function = "validate_not_blank", message = "Product name is required"),
        custom(
            function = "validate_catalog_name",
            message = "Product name must be 2-100 characters"
        )
    )]
    pub name: Option<String>,

    #[validate(
        custom(function = "validate_not_blank", message = "Description is required"),
        custom(function = "validate_product_description")
    )]
    pub description: Option<String>,

    #[validate(custom(function = "validate_product_price"))]
    pub price: Option<Decimal>,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,

    #[validate(
        custom(function = "validate_not_blank", message = "SKU cannot be blank"),
        length(max = 50, message = "SKU must not exceed 50 characters")
    )]
    pub sku: Option<String>,

    pub category_id: Option<Uuid>,

    #[validate(url(message = "Please enter a valid image URL"))]
    pub image_url: Option<String>,

    pub item_ids: Option<Vec<Uuid>>,

    pub is_active: Option<bool>,
}

/// Storefront listing filters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ProductListQuery {
    pub category_id: Option<Uuid>,
    /// Matches name, description, category name or SKU
    pub search: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl ProductListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page.unwrap_or(1),
            page_size: self
                .page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .min(MAX_PAGE_SIZE),
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SkuQuery {
    /// Product name the SKU is derived from
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SkuResponseDto {
    pub sku: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create() -> CreateProductDto {
        CreateProductDto {
            name: "Yoga Mat Premium".to_string(),
            description: "Non-slip mat for daily practice".to_string(),
            price: Decimal::from_str("49.99").unwrap(),
            stock: 40,
            sku: None,
            category_id: Uuid::new_v4(),
            image_url: Some("https://images.unsplash.com/photo-1".to_string()),
            item_ids: Vec::new(),
            is_active: None,
        }
    }

    fn product(item_ids: Vec<Uuid>) -> Product {
        Product {
            id: Uuid::new_v4(),
            name: "Bundle".to_string(),
            description: "A bundle of things".to_string(),
            price: Decimal::ZERO,
            stock: 5,
            sku: "BUN000001".to_string(),
            category_id: Uuid::new_v4(),
            image_url: None,
            item_ids,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_product() {
        assert!(create().validate().is_ok());
    }

    #[test]
    fn test_description_bounds() {
        let mut dto = create();
        dto.description = "Too short".to_string();
        assert!(dto.validate().is_err());
        dto.description = "Ten chars!".to_string();
        assert!(dto.validate().is_ok());
        dto.description = "d".repeat(501);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_price_and_stock_must_not_be_negative() {
        let mut dto = create();
        dto.price = Decimal::ZERO;
        dto.stock = 0;
        assert!(dto.validate().is_ok());

        dto.price = Decimal::from_str("-0.01").unwrap();
        dto.stock = -1;
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
        assert!(errors.field_errors().contains_key("stock"));
    }

    #[test]
    fn test_price_fits_the_price_column() {
        let mut dto = create();
        dto.price = Decimal::from_str("9999999999.99").unwrap();
        assert!(dto.validate().is_ok());

        dto.price = Decimal::from_str("12345678901.99").unwrap();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));

        dto.price = Decimal::from_str("19.999").unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_padded_text_is_measured_trimmed() {
        let mut dto = create();
        dto.name = " a".to_string();
        assert!(dto.validate().is_err());

        let mut dto = create();
        dto.description = "   too short   ".to_string();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_storefront_page_far_past_the_end() {
        let query = ProductListQuery {
            page: Some(i64::MAX),
            ..Default::default()
        };
        let (page, total) = query.pagination().paginate(vec!["a", "b"]);
        assert!(page.is_empty());
        assert_eq!(total, 2);
    }

    #[test]
    fn test_image_url_must_be_a_url() {
        let mut dto = create();
        dto.image_url = Some("not a url".to_string());
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_with_items_drops_dangling_ids() {
        let keep = Uuid::new_v4();
        let gone = Uuid::new_v4();
        let catalog = vec![ItemResponseDto {
            id: keep,
            name: "Strap".to_string(),
            description: None,
            category_id: Uuid::new_v4(),
            category_name: None,
            price: None,
            image_url: None,
            specifications: Default::default(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }];

        let dto = ProductResponseDto::with_category(product(vec![gone, keep]), &CategoryNames::default())
            .with_items(&catalog);

        let items = dto.items.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, keep);
        assert_eq!(dto.item_ids, vec![gone, keep]);
        assert_eq!(dto.category_name.as_deref(), Some("Uncategorized"));
        assert_eq!(dto.stock_status, StockStatus::LowStock);
    }

    #[test]
    fn test_search_covers_sku() {
        let dto = ProductResponseDto::from(product(Vec::new()));
        assert!(dto.matches("bun000"));
    }
}
