use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid assessment record: {0}")]
    InvalidRecord(String),

    #[error("missing required field: {0}")]
    MissingField(String),
}
