//! Formwork Secrets
//!
//! Developer tooling for exporting secrets from the cloud secrets store
//! into a local `.env` file. Loading is sequential and fail-fast; this is
//! a convenience for local development, not a runtime dependency of
//! synthesized stacks.

pub mod dotenv;
pub mod error;
pub mod store;

// Re-exports
pub use dotenv::{render, write_env_file};
pub use error::{Result, SecretsError};
pub use store::{CliSecretsStore, SecretValue, SecretsStore};
