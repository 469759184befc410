use std::env;
use std::time::Duration;

use crate::shared::constants::{ROLE_ADMIN, ROLE_CUSTOMER};

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub auth_token: AuthTokenConfig,
    pub swagger: SwaggerConfig,
    pub logto_m2m: LogtoM2MConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub issuer: String,
    pub audience: String,
    pub jwks_cache_ttl: Duration,
    pub jwt_leeway: Duration,
}

/// Settings for exchanging a Logto subject token into a user access token
#[derive(Clone, Debug)]
pub struct AuthTokenConfig {
    pub oidc_token_url: String,
    pub token_exchange_app_id: String,
    pub token_exchange_app_secret: String,
    pub api_resource: String,
    pub token_scopes: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Configuration for Logto Machine-to-Machine (M2M) authentication
/// Used for fetching management API tokens from Logto
#[derive(Debug, Clone)]
pub struct LogtoM2MConfig {
    pub client_id: String,
    pub client_secret: String,
    pub resource: String,
    pub scope: String,
    pub token_url: String,
    pub api_base_url: String,
}

/// Catalog behaviour toggles
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Role written to the users table for new sign-ups
    pub signup_default_role: String,
    /// Insert the sample catalog on startup when no categories exist
    pub seed_sample_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            auth_token: AuthTokenConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            logto_m2m: LogtoM2MConfig::from_env()?,
            catalog: CatalogConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 3600; // 1 hour
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        let issuer = env::var("LOGTO_ISSUER")
            .map_err(|_| "LOGTO_ISSUER environment variable is required".to_string())?;

        let audience = env::var("LOGTO_AUDIENCE")
            .map_err(|_| "LOGTO_AUDIENCE environment variable is required".to_string())?;

        let jwks_cache_ttl_secs = env::var("JWKS_CACHE_TTL")
            .unwrap_or_else(|_| Self::DEFAULT_JWKS_CACHE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWKS_CACHE_TTL must be a valid number".to_string())?;

        let jwt_leeway_secs = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        Ok(Self {
            issuer,
            audience,
            jwks_cache_ttl: Duration::from_secs(jwks_cache_ttl_secs),
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
        })
    }
}

impl AuthTokenConfig {
    pub fn from_env() -> Result<Self, String> {
        let issuer = env::var("LOGTO_ISSUER")
            .map_err(|_| "LOGTO_ISSUER environment variable is required".to_string())?;

        let token_exchange_app_id = env::var("LOGTO_TOKEN_EXCHANGE_APP_ID").map_err(|_| {
            "LOGTO_TOKEN_EXCHANGE_APP_ID environment variable is required".to_string()
        })?;

        let token_exchange_app_secret =
            env::var("LOGTO_TOKEN_EXCHANGE_APP_SECRET").map_err(|_| {
                "LOGTO_TOKEN_EXCHANGE_APP_SECRET environment variable is required".to_string()
            })?;

        // The API resource doubles as the JWT audience
        let api_resource = env::var("LOGTO_AUDIENCE")
            .map_err(|_| "LOGTO_AUDIENCE environment variable is required".to_string())?;

        let token_scopes = env::var("LOGTO_TOKEN_SCOPES")
            .unwrap_or_else(|_| "openid offline_access".to_string());

        Ok(Self {
            oidc_token_url: format!("{}/token", issuer),
            token_exchange_app_id,
            token_exchange_app_secret,
            api_resource,
            token_scopes,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Storefront API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Catalog and admin API for the storefront".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl LogtoM2MConfig {
    pub fn from_env() -> Result<Self, String> {
        let client_id = env::var("LOGTO_M2M_CLIENT_ID")
            .map_err(|_| "LOGTO_M2M_CLIENT_ID environment variable is required".to_string())?;

        let client_secret = env::var("LOGTO_M2M_CLIENT_SECRET")
            .map_err(|_| "LOGTO_M2M_CLIENT_SECRET environment variable is required".to_string())?;

        let resource = env::var("LOGTO_M2M_RESOURCE")
            .unwrap_or_else(|_| "https://default.logto.app/api".to_string());

        let scope = env::var("LOGTO_M2M_SCOPE").unwrap_or_else(|_| "all".to_string());

        let issuer = env::var("LOGTO_ISSUER")
            .map_err(|_| "LOGTO_ISSUER environment variable is required".to_string())?;
        let token_url = format!("{}/token", issuer);

        // Management API lives beside the OIDC endpoints
        let api_base_url = issuer.trim_end_matches("/oidc").to_string();

        Ok(Self {
            client_id,
            client_secret,
            resource,
            scope,
            token_url,
            api_base_url,
        })
    }
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, String> {
        let signup_default_role =
            env::var("SIGNUP_DEFAULT_ROLE").unwrap_or_else(|_| ROLE_CUSTOMER.to_string());
        Self::check_role(&signup_default_role)?;

        let seed_sample_data = env::var("SEED_SAMPLE_DATA")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .map_err(|_| "SEED_SAMPLE_DATA must be true or false".to_string())?;

        Ok(Self {
            signup_default_role,
            seed_sample_data,
        })
    }

    fn check_role(role: &str) -> Result<(), String> {
        if role == ROLE_ADMIN || role == ROLE_CUSTOMER {
            Ok(())
        } else {
            Err(format!(
                "SIGNUP_DEFAULT_ROLE must be '{}' or '{}', got '{}'",
                ROLE_ADMIN, ROLE_CUSTOMER, role
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_role_accepts_known_roles() {
        assert!(CatalogConfig::check_role("admin").is_ok());
        assert!(CatalogConfig::check_role("customer").is_ok());
    }

    #[test]
    fn test_check_role_rejects_unknown_role() {
        let err = CatalogConfig::check_role("super_admin").unwrap_err();
        assert!(err.contains("super_admin"));
    }

    #[test]
    fn test_swagger_credentials_require_both_parts() {
        let mut swagger = SwaggerConfig {
            username: Some("docs".to_string()),
            password: None,
            title: String::new(),
            version: String::new(),
            description: String::new(),
        };
        assert_eq!(swagger.credentials(), None);

        swagger.password = Some("secret".to_string());
        assert_eq!(swagger.credentials(), Some("docs:secret".to_string()));
    }
}
