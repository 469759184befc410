//! Machine-to-machine access to the Logto Management API.

pub mod token_manager;

pub use token_manager::LogtoTokenManager;
