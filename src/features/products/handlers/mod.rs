pub mod admin_product_handler;
pub mod product_handler;
