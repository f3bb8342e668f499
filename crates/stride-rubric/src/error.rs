use thiserror::Error;

#[derive(Debug, Error)]
pub enum RubricError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate section '{section_id}' in assessment '{assessment_id}'")]
    DuplicateSection {
        assessment_id: String,
        section_id: String,
    },

    #[error("band '{band}' of field '{label}' in assessment '{assessment_id}' has min {min} > max {max}")]
    InvalidBand {
        assessment_id: String,
        label: String,
        band: String,
        min: f64,
        max: f64,
    },
}
