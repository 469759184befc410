use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

pub type Specifications = BTreeMap<String, String>;

/// Database model for a catalog item (a component that products bundle)
#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub specifications: Option<Json<Specifications>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Empty specification maps are stored as NULL
pub fn specifications_column(specs: Option<Specifications>) -> Option<Json<Specifications>> {
    specs.filter(|s| !s.is_empty()).map(Json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_specifications_become_null() {
        assert!(specifications_column(None).is_none());
        assert!(specifications_column(Some(Specifications::new())).is_none());

        let specs = Specifications::from([("Color".to_string(), "Black".to_string())]);
        let column = specifications_column(Some(specs)).unwrap();
        assert_eq!(column.0["Color"], "Black");
    }
}
