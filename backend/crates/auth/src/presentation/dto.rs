//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::{AccessFilter, RoleFilter, UserFilter};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub cpf: String,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub password: String,
    pub confirm_password: String,
    /// Request the admin role; only honored for admin callers
    #[serde(default)]
    pub admin: bool,
}

/// Register response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: i64,
    pub cpf: String,
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub cpf: String,
    pub password: String,
}

/// Login response: the profile of the freshly authenticated user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub cpf: String,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub role: String,
    pub expires_at_ms: i64,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub cpf: Option<String>,
    pub role: Option<String>,
    pub expires_at_ms: Option<i64>,
}

// ============================================================================
// Password Reset
// ============================================================================

/// Reset request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequestRequest {
    pub cpf: String,
}

/// Reset request response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequestResponse {
    pub reset_token: Uuid,
    pub expires_at_ms: i64,
}

/// Reset completion request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetCompleteRequest {
    pub token: Uuid,
    pub new_password: String,
    pub confirm_password: String,
}

// ============================================================================
// Admin
// ============================================================================

/// One row of the admin user listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub cpf: String,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub role: String,
    pub access: String,
    pub created_at_ms: i64,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            cpf: user.cpf.as_str().to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            city: user.city,
            role: user.role.code().to_string(),
            access: user.access.code().to_string(),
            created_at_ms: user.created_at.timestamp_millis(),
        }
    }
}

/// Response for idempotent state changes
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedResponse {
    pub changed: bool,
}

/// Access toggle request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAccessRequest {
    pub granted: bool,
}

/// Query parameters for the admin user listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub search: Option<String>,
    /// "granted" or "blocked"; anything else means no filter
    pub access: Option<String>,
    /// "admin" or "regular"; anything else means no filter
    pub role: Option<String>,
}

impl ListUsersQuery {
    pub fn into_filter(self) -> UserFilter {
        let access = match self.access.as_deref() {
            Some("granted") => AccessFilter::Granted,
            Some("blocked") => AccessFilter::Blocked,
            _ => AccessFilter::All,
        };

        let role = match self.role.as_deref() {
            Some("admin") => RoleFilter::Admins,
            Some("regular") => RoleFilter::Regular,
            _ => RoleFilter::All,
        };

        UserFilter {
            search: self.search,
            access,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_parsing() {
        let query = ListUsersQuery {
            search: Some("ana".to_string()),
            access: Some("granted".to_string()),
            role: Some("admin".to_string()),
        };

        let filter = query.into_filter();
        assert_eq!(filter.search.as_deref(), Some("ana"));
        assert_eq!(filter.access, AccessFilter::Granted);
        assert_eq!(filter.role, RoleFilter::Admins);
    }

    #[test]
    fn test_unknown_filter_values_mean_all() {
        let query = ListUsersQuery {
            search: None,
            access: Some("everything".to_string()),
            role: Some("root".to_string()),
        };

        let filter = query.into_filter();
        assert_eq!(filter.access, AccessFilter::All);
        assert_eq!(filter.role, RoleFilter::All);
    }
}
