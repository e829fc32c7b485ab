//! Synthesis error types

use thiserror::Error;

/// Synthesis errors
#[derive(Error, Debug)]
pub enum SynthError {
    #[error("Duplicate resource logical id: {0}")]
    DuplicateResource(String),

    #[error("Duplicate output: {0}")]
    DuplicateOutput(String),

    #[error("Invalid logical id {id:?}: {reason}")]
    InvalidLogicalId { id: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SynthError>;
