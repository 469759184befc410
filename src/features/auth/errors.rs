use crate::core::error::AppError;

/// Failure codes reported by the identity provider that get a friendlier message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthErrorCode {
    UserNotFound,
    WrongPassword,
    InvalidEmail,
    UserDisabled,
    EmailAlreadyInUse,
    WeakPassword,
    Other(String),
}

impl AuthErrorCode {
    /// Map a Logto error code onto the known set
    pub fn from_provider_code(code: &str) -> Self {
        match code {
            "entity.not_found" | "user.not_found" => Self::UserNotFound,
            "session.invalid_credentials" | "user.password_not_match" => Self::WrongPassword,
            "user.invalid_email" | "guard.invalid_input" => Self::InvalidEmail,
            "user.suspended" => Self::UserDisabled,
            "user.email_already_in_use" | "user.email.exists" => Self::EmailAlreadyInUse,
            "password.rejected" | "user.password_policy_violation" => Self::WeakPassword,
            other => Self::Other(other.to_string()),
        }
    }

    /// Message shown to the user for this failure
    pub fn message(&self) -> &'static str {
        match self {
            Self::UserNotFound => "No user found with this email.",
            Self::WrongPassword => "Incorrect password.",
            Self::InvalidEmail => "The email address is invalid.",
            Self::UserDisabled => "This account has been disabled.",
            Self::EmailAlreadyInUse => "Email already registered",
            Self::WeakPassword => "Password does not meet the password policy.",
            Self::Other(_) => "Login failed. Please check your credentials.",
        }
    }
}

impl From<AuthErrorCode> for AppError {
    fn from(code: AuthErrorCode) -> Self {
        let message = code.message().to_string();
        match code {
            AuthErrorCode::UserNotFound => AppError::NotFound(message),
            AuthErrorCode::WrongPassword => AppError::Unauthorized(message),
            AuthErrorCode::InvalidEmail | AuthErrorCode::WeakPassword => {
                AppError::Validation(message)
            }
            AuthErrorCode::UserDisabled => AppError::Forbidden(message),
            AuthErrorCode::EmailAlreadyInUse => AppError::Conflict(message),
            AuthErrorCode::Other(code) => {
                tracing::warn!("Unmapped identity provider error code: {}", code);
                AppError::Unauthorized(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_get_friendly_messages() {
        assert_eq!(
            AuthErrorCode::from_provider_code("user.not_found").message(),
            "No user found with this email."
        );
        assert_eq!(
            AuthErrorCode::from_provider_code("session.invalid_credentials").message(),
            "Incorrect password."
        );
        assert_eq!(
            AuthErrorCode::from_provider_code("user.invalid_email").message(),
            "The email address is invalid."
        );
    }

    #[test]
    fn test_unknown_code_falls_back_to_generic_message() {
        let code = AuthErrorCode::from_provider_code("oidc.server_error");
        assert_eq!(code, AuthErrorCode::Other("oidc.server_error".to_string()));
        assert_eq!(
            code.message(),
            "Login failed. Please check your credentials."
        );
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(
            AppError::from(AuthErrorCode::UserNotFound),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(AuthErrorCode::WrongPassword),
            AppError::Unauthorized(_)
        ));
        assert!(matches!(
            AppError::from(AuthErrorCode::EmailAlreadyInUse),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(AuthErrorCode::UserDisabled),
            AppError::Forbidden(_)
        ));
    }
}
