//! Secrets store error types

use std::path::PathBuf;
use thiserror::Error;

/// Secrets store errors
#[derive(Error, Debug)]
pub enum SecretsError {
    #[error("AWS CLI (aws) not found; install it and make sure it is on PATH")]
    CliNotFound,

    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    #[error("Secret not found: {0}")]
    NotFound(String),

    #[error("Some secrets could not be loaded:\n{0}")]
    PartialFailure(String),

    #[error("Output file already exists: {0} (pass --overwrite to replace it)")]
    FileExists(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SecretsError>;
