//! stride-auth
//!
//! Credential and session layer: password hashing, JWT issuance and
//! validation, the user directory, and input validation for auth requests.

pub mod error;
pub mod jwt;
pub mod password;
pub mod users;
pub mod validate;
