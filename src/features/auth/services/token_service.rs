use crate::core::config::AuthTokenConfig;
use crate::core::error::{AppError, Result};
use crate::features::logto::LogtoTokenManager;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const TOKEN_EXCHANGE_GRANT: &str = "urn:ietf:params:oauth:grant-type:token-exchange";
const ACCESS_TOKEN_TYPE: &str = "urn:ietf:params:oauth:token-type:access_token";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubjectTokenResponse {
    subject_token: String,
    expires_in: u64,
}

/// Tokens issued by the OIDC token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSubjectTokenRequest<'a> {
    user_id: &'a str,
}

/// `Basic` authorization value for the token exchange application
fn basic_auth_header(app_id: &str, app_secret: &str) -> String {
    format!(
        "Basic {}",
        BASE64.encode(format!("{}:{}", app_id, app_secret).as_bytes())
    )
}

/// Issues user access tokens through Logto subject token exchange
pub struct TokenService {
    config: AuthTokenConfig,
    token_manager: Arc<LogtoTokenManager>,
    http_client: reqwest::Client,
}

impl TokenService {
    pub fn new(config: AuthTokenConfig, token_manager: Arc<LogtoTokenManager>) -> Self {
        Self {
            config,
            token_manager,
            http_client: reqwest::Client::new(),
        }
    }

    /// Create an access token for a user: mint a subject token with the
    /// Management API, then exchange it at the OIDC token endpoint
    pub async fn create_token(&self, user_id: &str) -> Result<TokenExchangeResponse> {
        let subject_token = self.create_subject_token(user_id).await?;

        let response = self
            .post_token_form(&[
                ("grant_type", TOKEN_EXCHANGE_GRANT),
                ("subject_token", &subject_token),
                ("subject_token_type", ACCESS_TOKEN_TYPE),
                ("resource", &self.config.api_resource),
                ("scope", &self.config.token_scopes),
            ])
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Token exchange failed: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Token exchange failed: HTTP {}",
                status
            )));
        }

        let tokens = parse_tokens(response).await?;
        tracing::info!(
            "Issued access token for user {}, expires in {} seconds",
            user_id,
            tokens.expires_in
        );
        Ok(tokens)
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenExchangeResponse> {
        tracing::debug!("Refreshing access token");

        let response = self
            .post_token_form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("resource", &self.config.api_resource),
                ("scope", &self.config.token_scopes),
            ])
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(AppError::Unauthorized(
                "Invalid or expired refresh token".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Token refresh failed: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Token refresh failed: HTTP {}",
                status
            )));
        }

        parse_tokens(response).await
    }

    async fn create_subject_token(&self, user_id: &str) -> Result<String> {
        let m2m_token = self.token_manager.get_access_token().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to get M2M token: {}", e))
        })?;

        let url = format!("{}/api/subject-tokens", self.token_manager.api_base_url());

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&m2m_token.access_token)
            .json(&CreateSubjectTokenRequest { user_id })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to create subject token: {}", e);
                AppError::ExternalServiceError(format!("Failed to create subject token: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Logto API error creating subject token: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Failed to create subject token: HTTP {}",
                status
            )));
        }

        let subject: SubjectTokenResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse subject token response: {}", e);
            AppError::ExternalServiceError(format!("Failed to parse subject token response: {}", e))
        })?;

        tracing::debug!("Subject token expires in {} seconds", subject.expires_in);
        Ok(subject.subject_token)
    }

    async fn post_token_form(&self, form: &[(&str, &str)]) -> Result<reqwest::Response> {
        self.http_client
            .post(&self.config.oidc_token_url)
            .header(
                "Authorization",
                basic_auth_header(
                    &self.config.token_exchange_app_id,
                    &self.config.token_exchange_app_secret,
                ),
            )
            .form(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach OIDC token endpoint: {}", e);
                AppError::ExternalServiceError(format!("Failed to reach token endpoint: {}", e))
            })
    }
}

async fn parse_tokens(response: reqwest::Response) -> Result<TokenExchangeResponse> {
    response.json().await.map_err(|e| {
        tracing::error!("Failed to parse token response: {}", e);
        AppError::ExternalServiceError(format!("Failed to parse token response: {}", e))
    })
}
