//! stride-export
//!
//! HTML rendering of assembled reports and PDF generation.

pub mod error;
pub mod pdf;
pub mod render;
pub mod styles;
