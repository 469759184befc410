use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::ROLE_ADMIN;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub account_id: String,
    /// Logto user id; also the primary key of the users table
    pub sub: String,
    /// Session UID (only present for interactive OIDC flows, not for token exchange)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_uid: Option<String>,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Check if user has a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Check if user may use the admin catalog endpoints
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Replace whatever roles the token carried with the stored one
    pub fn assign_role(&mut self, role: &str) {
        self.roles = vec![role.to_string()];
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomClaims {
    #[serde(default)]
    pub roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            account_id: "acc".to_string(),
            sub: "sub".to_string(),
            session_uid: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_is_admin() {
        assert!(user(&["admin"]).is_admin());
        assert!(!user(&["customer"]).is_admin());
        assert!(!user(&[]).is_admin());
    }

    #[test]
    fn test_assign_role_replaces_token_roles() {
        let mut u = user(&["admin", "customer"]);
        u.assign_role("customer");
        assert_eq!(u.roles, vec!["customer".to_string()]);
        assert!(!u.is_admin());
    }
}
