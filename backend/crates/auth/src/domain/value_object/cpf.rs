//! CPF Value Object
//!
//! The 11-digit national ID used as the unique login key. Validation
//! is strict format checking only: exactly 11 ASCII decimal digits,
//! no separators accepted and none stripped.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// CPF validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CpfError {
    #[error("CPF must be exactly 11 decimal digits")]
    InvalidFormat,
}

/// Validated CPF
///
/// `Display` shows the masked form so accidental logging never leaks
/// the full document number; use [`Cpf::as_str`] for storage.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cpf(String);

impl Cpf {
    /// Validate and wrap a CPF string
    pub fn new(raw: &str) -> Result<Self, CpfError> {
        if raw.len() == 11 && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(CpfError::InvalidFormat)
        }
    }

    /// Full digits, for storage and lookups
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First three digits only, for logs
    pub fn masked(&self) -> String {
        format!("{}********", &self.0[..3])
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl fmt::Debug for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cpf").field(&self.masked()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpf() {
        let cpf = Cpf::new("12345678901").unwrap();
        assert_eq!(cpf.as_str(), "12345678901");
    }

    #[test]
    fn test_all_zeroes_is_format_valid() {
        // Format validation only; no check-digit arithmetic
        assert!(Cpf::new("00000000000").is_ok());
    }

    #[test]
    fn test_wrong_lengths() {
        assert_eq!(Cpf::new(""), Err(CpfError::InvalidFormat));
        assert_eq!(Cpf::new("1234567890"), Err(CpfError::InvalidFormat));
        assert_eq!(Cpf::new("123456789012"), Err(CpfError::InvalidFormat));
    }

    #[test]
    fn test_non_digits_rejected() {
        assert_eq!(Cpf::new("1234567890a"), Err(CpfError::InvalidFormat));
        assert_eq!(Cpf::new("12345 78901"), Err(CpfError::InvalidFormat));
    }

    #[test]
    fn test_separators_not_normalized() {
        // A formatted CPF is rejected, not stripped
        assert_eq!(Cpf::new("123.456.789-01"), Err(CpfError::InvalidFormat));
    }

    #[test]
    fn test_unicode_digits_rejected() {
        // Fullwidth digits are not ASCII digits
        assert_eq!(Cpf::new("１２３４５６７８９０１"), Err(CpfError::InvalidFormat));
    }

    #[test]
    fn test_display_is_masked() {
        let cpf = Cpf::new("12345678901").unwrap();
        assert_eq!(cpf.to_string(), "123********");
        assert_eq!(format!("{:?}", cpf), "Cpf(\"123********\")");
    }
}
