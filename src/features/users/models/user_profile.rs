use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `users` table. The id is the Logto user id.
#[derive(Debug, Clone, FromRow)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
