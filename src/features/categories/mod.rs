//! Product categories.
//!
//! The storefront sees active categories only; admins manage the full list
//! and see how many items point at each category.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
