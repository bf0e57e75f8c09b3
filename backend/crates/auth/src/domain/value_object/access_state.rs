//! Access State Value Object
//!
//! Whether the account may authenticate at all. Independent from
//! [`UserRole`](super::user_role::UserRole): an admin can be blocked,
//! a regular user can be granted. A blocked account never logs in,
//! even with the correct password.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum AccessState {
    Granted = 0,

    /// New registrations start blocked until an administrator grants
    /// access.
    #[default]
    Blocked = 1,
}

impl AccessState {
    /// Numeric ID for database storage
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    /// String code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Blocked => "blocked",
        }
    }

    /// Check if login is allowed
    #[inline]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Create from numeric ID
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Granted),
            1 => Some(Self::Blocked),
            _ => None,
        }
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "granted" => Some(Self::Granted),
            "blocked" => Some(Self::Blocked),
            _ => None,
        }
    }

    /// Create from the boolean used at the API surface
    #[inline]
    pub fn from_granted(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Blocked }
    }
}

impl fmt::Display for AccessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_id() {
        assert_eq!(AccessState::from_id(0), Some(AccessState::Granted));
        assert_eq!(AccessState::from_id(1), Some(AccessState::Blocked));
        assert_eq!(AccessState::from_id(7), None);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(AccessState::from_code("granted"), Some(AccessState::Granted));
        assert_eq!(AccessState::from_code("blocked"), Some(AccessState::Blocked));
        assert_eq!(AccessState::from_code("open"), None);
    }

    #[test]
    fn test_can_login() {
        assert!(AccessState::Granted.can_login());
        assert!(!AccessState::Blocked.can_login());
    }

    #[test]
    fn test_default_is_blocked() {
        assert_eq!(AccessState::default(), AccessState::Blocked);
    }

    #[test]
    fn test_from_granted() {
        assert_eq!(AccessState::from_granted(true), AccessState::Granted);
        assert_eq!(AccessState::from_granted(false), AccessState::Blocked);
    }
}
