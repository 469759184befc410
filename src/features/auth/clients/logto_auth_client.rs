use crate::core::error::{AppError, Result};
use crate::features::auth::errors::AuthErrorCode;
use crate::features::logto::LogtoTokenManager;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Logto user response from Management API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogtoUserResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub primary_email_verified: bool,
    #[serde(default)]
    pub is_suspended: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateUserRequest<'a> {
    primary_email: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyPasswordRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LogtoErrorResponse {
    #[serde(default)]
    code: String,
}

/// Read the Logto error code out of an error response body
pub fn provider_error_code(body: &str) -> Option<AuthErrorCode> {
    serde_json::from_str::<LogtoErrorResponse>(body)
        .ok()
        .filter(|e| !e.code.is_empty())
        .map(|e| AuthErrorCode::from_provider_code(&e.code))
}

/// Client for the Logto Management API user operations
pub struct LogtoAuthClient {
    token_manager: Arc<LogtoTokenManager>,
    http_client: reqwest::Client,
}

impl LogtoAuthClient {
    pub fn new(token_manager: Arc<LogtoTokenManager>) -> Self {
        Self {
            token_manager,
            http_client: reqwest::Client::new(),
        }
    }

    async fn m2m_token(&self) -> Result<String> {
        self.token_manager
            .get_access_token()
            .await
            .map(|t| t.access_token)
            .map_err(|e| AppError::ExternalServiceError(format!("Failed to get M2M token: {}", e)))
    }

    /// Create a new user account with email/password sign-in
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<LogtoUserResponse> {
        let token = self.m2m_token().await?;
        let url = format!("{}/api/users", self.token_manager.api_base_url());

        tracing::debug!("Creating user in Logto: {}", email);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&token)
            .json(&CreateUserRequest {
                primary_email: email,
                password,
                name,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to create user in Logto: {}", e);
                AppError::ExternalServiceError(format!("Failed to create user: {}", e))
            })?;

        let status = response.status();

        if status.is_success() {
            let user = response.json::<LogtoUserResponse>().await.map_err(|e| {
                tracing::error!("Failed to parse Logto user response: {}", e);
                AppError::ExternalServiceError(format!("Failed to parse user response: {}", e))
            })?;

            tracing::info!("Created identity for user: {}", user.id);
            return Ok(user);
        }

        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::UNPROCESSABLE_ENTITY || status == StatusCode::BAD_REQUEST {
            return Err(match provider_error_code(&body) {
                Some(code)
                    if matches!(
                        code,
                        AuthErrorCode::EmailAlreadyInUse
                            | AuthErrorCode::WeakPassword
                            | AuthErrorCode::InvalidEmail
                    ) =>
                {
                    code.into()
                }
                _ => {
                    tracing::warn!("Logto rejected sign-up: {}", body);
                    AppError::Validation(format!("Invalid request: {}", body))
                }
            });
        }

        tracing::error!("Logto API error: HTTP {} - {}", status, body);
        Err(AppError::ExternalServiceError(format!(
            "Logto API error: HTTP {}",
            status
        )))
    }

    /// Find user by exact email
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<LogtoUserResponse>> {
        let token = self.m2m_token().await?;
        let url = format!(
            "{}/api/users?search={}",
            self.token_manager.api_base_url(),
            urlencoding::encode(email)
        );

        tracing::debug!("Searching for user by email: {}", email);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to search users in Logto: {}", e);
                AppError::ExternalServiceError(format!("Failed to search users: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Logto API error: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Logto API error: HTTP {}",
                status
            )));
        }

        let users = response
            .json::<Vec<LogtoUserResponse>>()
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse users response: {}", e);
                AppError::ExternalServiceError(format!("Failed to parse users response: {}", e))
            })?;

        Ok(exact_email_match(users, email))
    }

    /// Verify user password; `Ok(false)` means the password is wrong
    pub async fn verify_password(&self, user_id: &str, password: &str) -> Result<bool> {
        let token = self.m2m_token().await?;
        let url = format!(
            "{}/api/users/{}/password/verify",
            self.token_manager.api_base_url(),
            user_id
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&token)
            .json(&VerifyPasswordRequest { password })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to verify password: {}", e);
                AppError::ExternalServiceError(format!("Failed to verify password: {}", e))
            })?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(true),
            StatusCode::UNPROCESSABLE_ENTITY => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::error!("Logto API error: HTTP {} - {}", status, body);
                Err(AppError::ExternalServiceError(format!(
                    "Logto API error: HTTP {}",
                    status
                )))
            }
        }
    }
}

/// The search endpoint matches substrings; keep only the exact address (case-insensitive)
fn exact_email_match(users: Vec<LogtoUserResponse>, email: &str) -> Option<LogtoUserResponse> {
    users.into_iter().find(|u| {
        u.primary_email
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case(email))
    })
}
