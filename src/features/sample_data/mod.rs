//! Demo catalog for fresh installations.

pub mod catalog;
pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
