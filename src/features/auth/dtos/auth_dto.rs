use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::dtos::UserProfileDto;
use crate::shared::validation::{validate_not_blank, EMAIL_REGEX, PHONE_REGEX};

/// Request DTO for customer sign-up
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(
        custom(function = "validate_not_blank", message = "Name is required"),
        length(max = 100, message = "Name must not exceed 100 characters")
    )]
    pub name: String,

    #[validate(regex(path = *EMAIL_REGEX, message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Please enter a valid phone number"))]
    pub phone: Option<String>,

    #[validate(length(max = 200, message = "Address must not exceed 200 characters"))]
    pub address: Option<String>,
}

/// Request DTO for user login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(regex(path = *EMAIL_REGEX, message = "The email address is invalid."))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Request DTO for token refresh
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequestDto {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshTokenResponseDto {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    pub expires_in: i64,
    /// New refresh token (if rotated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Response DTO for register and login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    /// Logto access token for the API resource
    pub access_token: String,
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user: AuthUserDto,
    /// Profile row; null when it could not be written or does not exist
    pub profile: Option<UserProfileDto>,
}

/// Identity as known to Logto
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthUserDto {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub email_verified: bool,
}

/// Response for `GET /api/auth/me`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurrentUserDto {
    pub id: String,
    pub account_id: String,
    pub roles: Vec<String>,
    pub is_admin: bool,
    pub profile: Option<UserProfileDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn register_dto() -> RegisterRequestDto {
        RegisterRequestDto {
            name: Name().fake(),
            email: SafeEmail().fake(),
            password: "secret1".to_string(),
            phone: None,
            address: None,
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(register_dto().validate().is_ok());
    }

    #[test]
    fn test_registration_field_rules() {
        let mut dto = register_dto();
        dto.name = String::new();
        dto.password = "12345".to_string();
        dto.phone = Some("+0123".to_string());
        dto.address = Some("a".repeat(201));

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("address"));
        assert!(!fields.contains_key("email"));
    }

    #[test]
    fn test_password_boundary() {
        let mut dto = register_dto();
        dto.password = "123456".to_string();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_login_password_rule() {
        let mut dto = LoginRequestDto {
            email: SafeEmail().fake(),
            password: "12345".to_string(),
        };
        let errors = dto.validate().unwrap_err();
        let message = errors.field_errors()["password"][0]
            .message
            .as_ref()
            .map(|m| m.to_string());
        assert_eq!(
            message.as_deref(),
            Some("Password must be at least 6 characters")
        );

        dto.password = "123456".to_string();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_login_email_message() {
        let dto = LoginRequestDto {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        let errors = dto.validate().unwrap_err();
        let message = errors.field_errors()["email"][0]
            .message
            .as_ref()
            .map(|m| m.to_string());
        assert_eq!(message.as_deref(), Some("The email address is invalid."));
    }
}
