//! Sellable products with price, stock and SKU.
//!
//! A product references one category and bundles any number of items.
//! Responses carry a derived `stock_status`.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
