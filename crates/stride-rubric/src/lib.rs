//! stride-rubric
//!
//! Scoring rubrics for assessment reports. Pure data and pure functions, no
//! I/O beyond loading a configuration file. Resolves configured paths into
//! assessment records, classifies the values into qualitative bands, and
//! assembles the normalized payload a report template consumes.

pub mod assemble;
pub mod assessments;
pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod path;
pub mod registry;

pub use assemble::{assemble, assemble_now, ProcessedReport, ResolvedField, ResolvedSection};
pub use classify::{classify, Band, Classification, ClassificationTable};
pub use config::{AssessmentConfig, FieldSpec, Section};
pub use path::{extract, FieldPath};
pub use registry::ConfigRegistry;
