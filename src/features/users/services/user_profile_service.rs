use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{NewUserProfile, UpdateProfileDto, UserProfileDto};
use crate::features::users::models::UserProfile;

const PROFILE_COLUMNS: &str =
    "id, name, email, phone, address, role, is_active, created_at, updated_at";

/// Reads and writes the `users` table
pub struct UserProfileService {
    pool: PgPool,
}

impl UserProfileService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert the profile row for a newly registered account
    pub async fn create_profile(&self, profile: NewUserProfile) -> Result<UserProfile> {
        let query = format!(
            r#"
            INSERT INTO users (id, name, email, phone, address, role, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, true)
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        sqlx::query_as::<_, UserProfile>(&query)
            .bind(&profile.id)
            .bind(&profile.name)
            .bind(&profile.email)
            .bind(&profile.phone)
            .bind(&profile.address)
            .bind(&profile.role)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::Conflict("Email already registered".to_string());
                    }
                }
                tracing::error!("Failed to create profile for {}: {:?}", profile.id, e);
                AppError::Database(e)
            })
    }

    pub async fn find_profile(&self, id: &str) -> Result<Option<UserProfile>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", PROFILE_COLUMNS);

        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch profile {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    pub async fn get_profile(&self, id: &str) -> Result<UserProfileDto> {
        self.find_profile(id)
            .await?
            .map(UserProfileDto::from)
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    pub async fn update_profile(&self, id: &str, dto: UpdateProfileDto) -> Result<UserProfileDto> {
        let query = format!(
            r#"
            UPDATE users
            SET name = COALESCE($1, name),
                phone = COALESCE($2, phone),
                address = COALESCE($3, address),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        let profile = sqlx::query_as::<_, UserProfile>(&query)
            .bind(dto.name.as_deref().map(str::trim))
            .bind(&dto.phone)
            .bind(&dto.address)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update profile {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

        tracing::info!("Updated profile {}", id);
        Ok(profile.into())
    }
}
