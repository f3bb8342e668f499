//! stride-storage
//!
//! Local-disk persistence. Thin wrapper around `tokio::fs` for the assessment
//! record source and the generated-report directory.

pub mod error;
pub mod records;
pub mod reports;
