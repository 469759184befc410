use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::LOW_STOCK_THRESHOLD;

/// Database model for a sellable product
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub sku: String,
    pub category_id: Uuid,
    pub image_url: Option<String>,
    pub item_ids: Vec<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn from_stock(stock: i32) -> Self {
        match stock {
            s if s <= 0 => Self::OutOfStock,
            s if s < LOW_STOCK_THRESHOLD => Self::LowStock,
            _ => Self::InStock,
        }
    }
}

/// First three characters of the name, upper-cased, followed by the last six
/// digits of the millisecond timestamp
pub fn generate_sku(name: &str, now: DateTime<Utc>) -> String {
    let prefix: String = name.trim().chars().take(3).collect::<String>().to_uppercase();
    let suffix = now.timestamp_millis().rem_euclid(1_000_000);
    format!("{}{:06}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stock_status_thresholds() {
        assert_eq!(StockStatus::from_stock(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_stock(1), StockStatus::LowStock);
        assert_eq!(StockStatus::from_stock(9), StockStatus::LowStock);
        assert_eq!(StockStatus::from_stock(10), StockStatus::InStock);
        assert_eq!(StockStatus::from_stock(250), StockStatus::InStock);
    }

    #[test]
    fn test_stock_status_serializes_snake_case() {
        let json = serde_json::to_string(&StockStatus::OutOfStock).unwrap();
        assert_eq!(json, "\"out_of_stock\"");
    }

    #[test]
    fn test_generate_sku() {
        let now = Utc.timestamp_millis_opt(1_722_470_123_456).unwrap();
        assert_eq!(generate_sku("iPhone 15 Pro", now), "IPH123456");
    }

    #[test]
    fn test_generate_sku_pads_suffix_and_handles_short_names() {
        let now = Utc.timestamp_millis_opt(1_722_470_000_042).unwrap();
        assert_eq!(generate_sku("tv", now), "TV000042");
        assert_eq!(generate_sku("", now), "000042");
    }
}
