use crate::core::error::Result;
use crate::features::auth::clients::{LogtoAuthClient, LogtoUserResponse};
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, CurrentUserDto, LoginRequestDto, RefreshTokenRequestDto,
    RefreshTokenResponseDto, RegisterRequestDto,
};
use crate::features::auth::errors::AuthErrorCode;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::token_service::{TokenExchangeResponse, TokenService};
use crate::features::users::dtos::{NewUserProfile, UserProfileDto};
use crate::features::users::models::UserProfile;
use crate::features::users::services::UserProfileService;
use std::sync::Arc;

/// Service for authentication operations (register, login, refresh)
pub struct AuthService {
    logto_client: Arc<LogtoAuthClient>,
    token_service: Arc<TokenService>,
    profiles: Arc<UserProfileService>,
    signup_role: String,
}

impl AuthService {
    pub fn new(
        logto_client: Arc<LogtoAuthClient>,
        token_service: Arc<TokenService>,
        profiles: Arc<UserProfileService>,
        signup_role: String,
    ) -> Self {
        Self {
            logto_client,
            token_service,
            profiles,
            signup_role,
        }
    }

    /// Create the identity, then the profile row, then issue tokens
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        let name = dto.name.trim().to_string();
        let user = self
            .logto_client
            .create_user(&dto.email, &dto.password, &name)
            .await?;

        let profile = match self
            .profiles
            .create_profile(NewUserProfile {
                id: user.id.clone(),
                name,
                email: dto.email.clone(),
                phone: dto.phone,
                address: dto.address,
                role: self.signup_role.clone(),
            })
            .await
        {
            Ok(profile) => Some(UserProfileDto::from(profile)),
            Err(e) => {
                tracing::warn!("Registered {} without a profile row: {}", user.id, e);
                None
            }
        };

        let tokens = self.token_service.create_token(&user.id).await?;
        tracing::info!("Registered user {}", user.id);

        Ok(auth_response(tokens, user, profile))
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = self
            .logto_client
            .find_user_by_email(&dto.email)
            .await?
            .ok_or(AuthErrorCode::UserNotFound)?;

        if user.is_suspended {
            return Err(AuthErrorCode::UserDisabled.into());
        }

        if !self
            .logto_client
            .verify_password(&user.id, &dto.password)
            .await?
        {
            return Err(AuthErrorCode::WrongPassword.into());
        }

        let profile = self.profiles.find_profile(&user.id).await?;
        if profile.as_ref().is_some_and(|p| !p.is_active) {
            return Err(AuthErrorCode::UserDisabled.into());
        }

        let tokens = self.token_service.create_token(&user.id).await?;

        Ok(auth_response(tokens, user, profile.map(UserProfileDto::from)))
    }

    /// Identity from the token merged with the profile row
    pub async fn current_user(&self, user: AuthenticatedUser) -> Result<CurrentUserDto> {
        let profile = self.profiles.find_profile(&user.sub).await?;
        Ok(current_user_dto(user, profile))
    }

    pub async fn refresh_token(
        &self,
        dto: RefreshTokenRequestDto,
    ) -> Result<RefreshTokenResponseDto> {
        let tokens = self.token_service.refresh_token(&dto.refresh_token).await?;

        Ok(RefreshTokenResponseDto {
            access_token: tokens.access_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            refresh_token: tokens.refresh_token,
        })
    }
}

fn auth_response(
    tokens: TokenExchangeResponse,
    user: LogtoUserResponse,
    profile: Option<UserProfileDto>,
) -> AuthResponseDto {
    AuthResponseDto {
        access_token: tokens.access_token,
        token_type: tokens.token_type,
        expires_in: tokens.expires_in,
        refresh_token: tokens.refresh_token,
        user: AuthUserDto {
            id: user.id,
            name: user.name,
            email: user.primary_email,
            email_verified: user.primary_email_verified,
        },
        profile,
    }
}

fn current_user_dto(user: AuthenticatedUser, profile: Option<UserProfile>) -> CurrentUserDto {
    let profile = profile.map(UserProfileDto::from);
    let is_admin = match &profile {
        Some(p) => p.is_admin,
        None => user.is_admin(),
    };

    CurrentUserDto {
        id: user.sub,
        account_id: user.account_id,
        roles: user.roles,
        is_admin,
        profile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_admin_user, create_customer_user};
    use chrono::Utc;

    fn profile(id: &str, role: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
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
    fn test_current_user_takes_admin_flag_from_profile() {
        let user = create_customer_user();
        let dto = current_user_dto(user, Some(profile("test-customer-id", "admin")));
        assert!(dto.is_admin);
        assert_eq!(dto.profile.map(|p| p.role), Some("admin".to_string()));
    }

    #[test]
    fn test_current_user_without_profile() {
        let dto = current_user_dto(create_admin_user(), None);
        assert!(dto.is_admin);
        assert!(dto.profile.is_none());

        let dto = current_user_dto(create_customer_user(), None);
        assert!(!dto.is_admin);
        assert_eq!(dto.id, "test-customer-id");
    }
}
