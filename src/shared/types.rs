use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::AppError;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Standard pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Number of records per page (default: 20, max: 100)
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationQuery {
    /// Number of records to skip for the requested page; saturates for huge page numbers
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    /// Get clamped page_size (respects MAX_PAGE_SIZE)
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Slice an already-fetched list down to the requested page.
    ///
    /// Returns the page together with the total size of the input.
    pub fn paginate<T>(&self, records: Vec<T>) -> (Vec<T>, i64) {
        let total = records.len() as i64;
        let page = records
            .into_iter()
            .skip(usize::try_from(self.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit()).unwrap_or(usize::MAX))
            .collect();
        (page, total)
    }
}

/// Search and pagination parameters shared by the admin list endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Case-insensitive substring; empty returns everything
    pub search: Option<String>,

    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
}

impl ListQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

/// Query flag required by every destructive endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DeleteQuery {
    /// Must be `true`; a delete without explicit confirmation is rejected
    #[serde(default)]
    pub confirm: bool,
}

impl DeleteQuery {
    pub fn require_confirmation(&self) -> Result<(), AppError> {
        if !self.confirm {
            return Err(AppError::BadRequest(
                "Deletion must be confirmed with confirm=true".to_string(),
            ));
        }
        Ok(())
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_clamps_limit_and_offset() {
        let query = PaginationQuery {
            page: 0,
            page_size: 500,
        };
        assert_eq!(query.limit(), MAX_PAGE_SIZE);
        assert_eq!(query.offset(), 0);

        let query = PaginationQuery {
            page: 3,
            page_size: 10,
        };
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn test_paginate_returns_page_and_total() {
        let query = PaginationQuery {
            page: 2,
            page_size: 2,
        };
        let (page, total) = query.paginate(vec![1, 2, 3, 4, 5]);
        assert_eq!(page, vec![3, 4]);
        assert_eq!(total, 5);
    }

    #[test]
    fn test_delete_requires_explicit_confirmation() {
        assert!(DeleteQuery::default().require_confirmation().is_err());
        assert!(DeleteQuery { confirm: true }.require_confirmation().is_ok());
    }

    #[test]
    fn test_huge_page_number_yields_empty_page() {
        let query = ListQuery {
            search: None,
            page: i64::MAX,
            page_size: 100,
        };
        assert_eq!(query.pagination().offset(), i64::MAX);

        let (page, total) = query.pagination().paginate(vec![1, 2, 3]);
        assert!(page.is_empty());
        assert_eq!(total, 3);
    }

    #[test]
    fn test_paginate_past_the_end_is_empty() {
        let query = PaginationQuery {
            page: 9,
            page_size: 10,
        };
        let (page, total) = query.paginate(vec!["a", "b"]);
        assert!(page.is_empty());
        assert_eq!(total, 2);
    }
}
