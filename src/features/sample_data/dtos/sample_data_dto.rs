use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What a sample data run inserted
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SampleDataReportDto {
    pub categories_created: usize,
    pub products_created: usize,
    /// Products whose category or own insert failed
    pub products_skipped: usize,
}
