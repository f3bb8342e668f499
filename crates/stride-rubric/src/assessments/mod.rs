//! Built-in assessment configurations.

pub mod cardiac;
pub mod fields;
pub mod health_fitness;

use crate::config::AssessmentConfig;

/// Return every built-in configuration with its assessment-type id.
pub fn all_assessments() -> Vec<(&'static str, AssessmentConfig)> {
    vec![
        (health_fitness::ID, health_fitness::config()),
        (cardiac::ID, cardiac::config()),
    ]
}
