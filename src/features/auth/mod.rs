//! Sign-up, login and token handling backed by Logto.
//!
//! Accounts live in Logto; the matching `users` row holds the storefront
//! profile and role. Access tokens are Logto JWTs validated against the
//! issuer's JWKS.

mod jwks;
mod validator;

pub mod clients;
pub mod dtos;
pub mod errors;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use jwks::JwksClient;
pub use validator::JwtValidator;
