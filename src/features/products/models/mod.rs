pub mod product;

pub use product::{generate_sku, Product, StockStatus};
