//! User Role Value Object
//!
//! Role and access state were two inconsistently named boolean columns
//! in earlier schema revisions; they are now two orthogonal enums.
//! This one answers "what may this user do", not "may they log in".

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Regular = 0,
    Admin = 1,
}

impl UserRole {
    /// Numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// String code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Create from numeric ID
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Regular),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "regular" => Some(Self::Regular),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id() {
        assert_eq!(UserRole::from_id(0), Some(UserRole::Regular));
        assert_eq!(UserRole::from_id(1), Some(UserRole::Admin));
        assert_eq!(UserRole::from_id(2), None);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(UserRole::from_code("regular"), Some(UserRole::Regular));
        assert_eq!(UserRole::from_code("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_code("superuser"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(UserRole::Regular.to_string(), "regular");
        assert_eq!(UserRole::Admin.to_string(), "admin");
    }

    #[test]
    fn test_is_admin() {
        assert!(!UserRole::Regular.is_admin());
        assert!(UserRole::Admin.is_admin());
    }

    #[test]
    fn test_default_is_regular() {
        assert_eq!(UserRole::default(), UserRole::Regular);
    }
}
