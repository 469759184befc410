//! Customer and admin profiles stored in the `users` table.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/me` | Profile of the caller |
//! | PATCH | `/api/me` | Update name, phone, address |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
