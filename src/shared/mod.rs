pub mod constants;
pub mod search;
pub mod test_helpers;
pub mod types;
pub mod validation;
