//! Shared Kernel
//!
//! The smallest domain-crossing core of the backend:
//! - Unified error type and result alias
//! - Conversions from common library errors
//!
//! Only things with a stable meaning across every backend crate
//! belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
