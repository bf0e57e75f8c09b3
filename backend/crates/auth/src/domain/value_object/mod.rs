//! Value Object Module

pub mod access_state;
pub mod cpf;
pub mod user_password;
pub mod user_role;
