use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::constants::UNCATEGORIZED;

/// Database model for category
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category row joined with the number of items that reference it
#[derive(Debug, Clone, FromRow)]
pub struct CategoryWithCount {
    #[sqlx(flatten)]
    pub category: Category,
    pub item_count: i64,
}

/// Id to name lookup used to denormalize items and products
#[derive(Debug, Clone, Default)]
pub struct CategoryNames(HashMap<Uuid, String>);

impl CategoryNames {
    pub fn name_for(&self, id: &Uuid) -> &str {
        self.0.get(id).map(String::as_str).unwrap_or(UNCATEGORIZED)
    }
}

impl From<Vec<Category>> for CategoryNames {
    fn from(categories: Vec<Category>) -> Self {
        Self(categories.into_iter().map(|c| (c.id, c.name)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_name_for_known_and_dangling_ids() {
        let books = category("Books");
        let books_id = books.id;
        let names = CategoryNames::from(vec![books, category("Sports")]);

        assert_eq!(names.name_for(&books_id), "Books");
        assert_eq!(names.name_for(&Uuid::new_v4()), "Uncategorized");
    }

    #[test]
    fn test_empty_lookup_is_all_uncategorized() {
        assert_eq!(CategoryNames::default().name_for(&Uuid::nil()), UNCATEGORIZED);
    }
}
