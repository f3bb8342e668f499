//! stride-core
//!
//! Pure domain types and artifact naming conventions.
//! No I/O. This is the shared vocabulary of the Stride system.

pub mod artifact_names;
pub mod error;
pub mod models;
