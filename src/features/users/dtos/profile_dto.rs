use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::models::UserProfile;
use crate::shared::constants::ROLE_ADMIN;
use crate::shared::validation::{validate_not_blank, PHONE_REGEX};

/// Profile fields written when an account is registered
#[derive(Debug, Clone)]
pub struct NewUserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for UserProfileDto {
    fn from(p: UserProfile) -> Self {
        Self {
            is_admin: p.role == ROLE_ADMIN,
            id: p.id,
            name: p.name,
            email: p.email,
            phone: p.phone,
            address: p.address,
            role: p.role,
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Partial profile update; absent fields keep their value
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 100, message = "Name must not exceed 100 characters")
    )]
    pub name: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "Please enter a valid phone number"))]
    pub phone: Option<String>,

    #[validate(length(max = 200, message = "Address must not exceed 200 characters"))]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: &str) -> UserProfile {
        UserProfile {
            id: "logto-1".to_string(),
            name: "Jane".to_string(),
            email: "jane@shop.io".to_string(),
            phone: None,
            address: None,
            role: role.to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_admin_follows_role() {
        assert!(UserProfileDto::from(profile("admin")).is_admin);
        assert!(!UserProfileDto::from(profile("customer")).is_admin);
    }

    #[test]
    fn test_update_validation() {
        let ok = UpdateProfileDto {
            name: Some("Jane Doe".to_string()),
            phone: Some("+628123456789".to_string()),
            address: None,
        };
        assert!(ok.validate().is_ok());

        let empty = UpdateProfileDto {
            name: None,
            phone: None,
            address: None,
        };
        assert!(empty.validate().is_ok());

        let bad = UpdateProfileDto {
            name: Some("   ".to_string()),
            phone: Some("0812".to_string()),
            address: Some("x".repeat(201)),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("address"));
    }
}
