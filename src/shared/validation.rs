use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Email addresses accepted at sign-up and login
    /// - Valid: "jane.doe@shop.io", "a_b+c@mail.co.uk"
    /// - Invalid: "jane@shop", "@shop.io", "jane doe@shop.io"
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();

    /// International phone number: optional leading '+', no leading zero, up to 16 digits
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[1-9]\d{0,15}$").unwrap();

    /// Item images must be direct links to a picture file
    pub static ref ITEM_IMAGE_URL_REGEX: Regex =
        Regex::new(r"(?i)^https?://.+\.(jpg|jpeg|png|gif|webp)$").unwrap();
}

/// Largest price an item may carry
pub const MAX_ITEM_PRICE: Decimal = Decimal::from_parts(999_999, 0, 0, false, 0);

/// Smallest positive price an item may carry
pub const MIN_ITEM_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest value a `NUMERIC(12, 2)` price column holds: 9_999_999_999.99
pub const MAX_PRODUCT_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Prices are stored with two decimal places
const PRICE_SCALE: u32 = 2;

fn error_with(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Rejects values that are empty once surrounding whitespace is removed
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error_with("required", "This field is required"));
    }
    Ok(())
}

/// Bounds on the trimmed text, which is what the services store
fn trimmed_length(
    value: &str,
    min: usize,
    max: usize,
    message: &'static str,
) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(error_with("length", message));
    }
    Ok(())
}

pub fn validate_category_name(value: &str) -> Result<(), ValidationError> {
    trimmed_length(value, 2, 50, "Category name must be 2-50 characters")
}

/// Item and product names
pub fn validate_catalog_name(value: &str) -> Result<(), ValidationError> {
    trimmed_length(value, 2, 100, "Name must be 2-100 characters")
}

pub fn validate_product_description(value: &str) -> Result<(), ValidationError> {
    trimmed_length(value, 10, 500, "Description must be 10-500 characters")
}

fn check_price_scale(price: &Decimal) -> Result<(), ValidationError> {
    if price.normalize().scale() > PRICE_SCALE {
        return Err(error_with("scale", "Price must have at most 2 decimal places"));
    }
    Ok(())
}

pub fn validate_product_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(error_with("min", "Price cannot be negative"));
    }
    if *price > MAX_PRODUCT_PRICE {
        return Err(error_with("max", "Price must not exceed 9999999999.99"));
    }
    check_price_scale(price)
}

pub fn validate_item_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < MIN_ITEM_PRICE {
        return Err(error_with("min", "Price must be at least 0.01"));
    }
    if *price > MAX_ITEM_PRICE {
        return Err(error_with("max", "Price must not exceed 999999"));
    }
    check_price_scale(price)
}

/// Every specification entry needs both a key and a value
pub fn validate_specifications(specs: &BTreeMap<String, String>) -> Result<(), ValidationError> {
    if specs.keys().any(|k| k.trim().is_empty()) {
        return Err(error_with("required", "Specification keys cannot be empty"));
    }
    if specs.values().any(|v| v.trim().is_empty()) {
        return Err(error_with("required", "Specification values cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_email_regex() {
        assert!(EMAIL_REGEX.is_match("jane.doe@shop.io"));
        assert!(EMAIL_REGEX.is_match("a_b+c@mail.co.uk"));
        assert!(!EMAIL_REGEX.is_match("jane@shop"));
        assert!(!EMAIL_REGEX.is_match("@shop.io"));
        assert!(!EMAIL_REGEX.is_match("jane doe@shop.io"));
        assert!(!EMAIL_REGEX.is_match(""));
    }

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("+14155550100"));
        assert!(PHONE_REGEX.is_match("9876543210"));
        assert!(!PHONE_REGEX.is_match("0123456"));
        assert!(!PHONE_REGEX.is_match("+1 415 555"));
        assert!(!PHONE_REGEX.is_match("12345678901234567"));
    }

    #[test]
    fn test_item_image_url_regex() {
        assert!(ITEM_IMAGE_URL_REGEX.is_match("https://cdn.shop.io/a/b.png"));
        assert!(ITEM_IMAGE_URL_REGEX.is_match("http://cdn.shop.io/pic.JPEG"));
        assert!(!ITEM_IMAGE_URL_REGEX.is_match("https://cdn.shop.io/pic.png?w=400"));
        assert!(!ITEM_IMAGE_URL_REGEX.is_match("ftp://cdn.shop.io/pic.png"));
    }

    #[test]
    fn test_item_price_bounds() {
        assert!(validate_item_price(&Decimal::from_str("0.01").unwrap()).is_ok());
        assert!(validate_item_price(&Decimal::from(999_999)).is_ok());
        assert!(validate_item_price(&Decimal::ZERO).is_err());
        assert!(validate_item_price(&Decimal::from_str("999999.01").unwrap()).is_err());
    }

    #[test]
    fn test_product_price_bounds() {
        assert!(validate_product_price(&Decimal::ZERO).is_ok());
        assert!(validate_product_price(&Decimal::from_str("19.99").unwrap()).is_ok());
        assert!(validate_product_price(&Decimal::from_str("-0.01").unwrap()).is_err());

        assert_eq!(
            MAX_PRODUCT_PRICE,
            Decimal::from_str("9999999999.99").unwrap()
        );
        assert!(validate_product_price(&Decimal::from_str("9999999999.99").unwrap()).is_ok());
        assert!(validate_product_price(&Decimal::from_str("10000000000.00").unwrap()).is_err());
        assert!(validate_product_price(&Decimal::from_str("12345678901.99").unwrap()).is_err());
    }

    #[test]
    fn test_prices_allow_two_decimal_places() {
        assert!(validate_product_price(&Decimal::from_str("1.50").unwrap()).is_ok());
        assert!(validate_product_price(&Decimal::from_str("1.500").unwrap()).is_ok());
        assert!(validate_product_price(&Decimal::from_str("1.505").unwrap()).is_err());
        assert!(validate_item_price(&Decimal::from_str("0.015").unwrap()).is_err());
    }

    #[test]
    fn test_trimmed_lengths() {
        assert!(validate_category_name(" a").is_err());
        assert!(validate_category_name("  a  ").is_err());
        assert!(validate_category_name(" TV ").is_ok());
        assert!(validate_category_name(&format!("  {}  ", "x".repeat(50))).is_ok());
        assert!(validate_category_name(&"x".repeat(51)).is_err());

        assert!(validate_catalog_name(" b ").is_err());
        assert!(validate_catalog_name(&"x".repeat(100)).is_ok());
        assert!(validate_catalog_name(&"x".repeat(101)).is_err());

        assert!(validate_product_description("   short   ").is_err());
        assert!(validate_product_description("Ten chars!").is_ok());
    }

    #[test]
    fn test_specifications_require_keys_and_values() {
        let mut specs = BTreeMap::new();
        specs.insert("Color".to_string(), "Red".to_string());
        assert!(validate_specifications(&specs).is_ok());

        specs.insert(" ".to_string(), "x".to_string());
        assert!(validate_specifications(&specs).is_err());

        let mut specs = BTreeMap::new();
        specs.insert("Size".to_string(), "".to_string());
        assert!(validate_specifications(&specs).is_err());
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("Books").is_ok());
        assert!(validate_not_blank("   ").is_err());
    }
}
