use std::sync::Arc;

use crate::core::error::Result;
use crate::features::categories::services::CategoryService;
use crate::features::products::services::ProductService;
use crate::features::sample_data::catalog::{CATEGORIES, PRODUCTS};
use crate::features::sample_data::dtos::SampleDataReportDto;

/// Inserts the demo catalog through the regular category and product services
pub struct SampleDataService {
    categories: Arc<CategoryService>,
    products: Arc<ProductService>,
}

impl SampleDataService {
    pub fn new(categories: Arc<CategoryService>, products: Arc<ProductService>) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// Each insert stands alone: a failure is logged and the run goes on
    pub async fn generate(&self) -> SampleDataReportDto {
        let mut report = SampleDataReportDto::default();
        let mut category_ids = Vec::with_capacity(CATEGORIES.len());

        for sample in &CATEGORIES {
            match self.categories.create(sample.to_dto()).await {
                Ok(category) => {
                    report.categories_created += 1;
                    category_ids.push(Some(category.id));
                }
                Err(e) => {
                    tracing::warn!("Sample category {} not created: {}", sample.name, e);
                    category_ids.push(None);
                }
            }
        }

        for sample in &PRODUCTS {
            let Some(category_id) = category_ids.get(sample.category).copied().flatten() else {
                tracing::warn!("Skipping sample product {}: category missing", sample.name);
                report.products_skipped += 1;
                continue;
            };

            match self.products.create(sample.to_dto(category_id)).await {
                Ok(_) => report.products_created += 1,
                Err(e) => {
                    tracing::warn!("Sample product {} not created: {}", sample.name, e);
                    report.products_skipped += 1;
                }
            }
        }

        tracing::info!(
            "Sample data generated: {} categories, {} products, {} skipped",
            report.categories_created,
            report.products_created,
            report.products_skipped
        );
        report
    }

    /// Generate only when the catalog has no categories yet
    pub async fn seed_if_empty(&self) -> Result<Option<SampleDataReportDto>> {
        if self.categories.count().await? > 0 {
            tracing::info!("Catalog already has categories, skipping sample data");
            return Ok(None);
        }
        Ok(Some(self.generate().await))
    }
}
