//! Manager error types

use thiserror::Error;

/// Manager errors
///
/// Configuration errors are fatal: the failing call performs no retry,
/// no fallback, and declares nothing on the stack. The operator fixes
/// the configuration and re-runs synthesis.
#[derive(Error, Debug)]
pub enum AwsError {
    #[error("Configuration error: {0}")]
    Resolve(#[from] formwork_core::ResolveError),

    #[error("Synthesis error: {0}")]
    Synth(#[from] formwork_synth::SynthError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AwsError>;
