//! Formwork AWS Managers
//!
//! This crate provides the manager layer: thin wrappers that turn
//! configuration collection entries into resource declarations on a
//! stack. Every manager method follows the same four-step template:
//!
//! 1. Resolve the entry by key from its collection — fail fast if missing
//! 2. Compute the stage-qualified resource name
//! 3. Construct the resource, merging environment defaults with the
//!    entry's typed fields and untyped passthrough properties
//! 4. Register outputs for the generated identifiers (ARN, name, id,
//!    domain)
//!
//! Managers hold no state of their own; everything they produce lives on
//! the stack they are handed. There is no retry and no fallback: a
//! configuration error aborts synthesis so the operator can fix the
//! blueprint and re-run.

pub mod api;
pub mod certificate;
pub mod compute;
pub mod dns;
pub mod environment;
pub mod error;
pub mod events;
pub mod iam;
pub mod messaging;
pub mod network;
pub mod secret;
pub mod storage;
pub mod synth;

// Re-exports
pub use api::ApiManager;
pub use certificate::CertificateManager;
pub use compute::FunctionManager;
pub use dns::DnsManager;
pub use environment::Environment;
pub use error::{AwsError, Result};
pub use events::EventsManager;
pub use iam::IamManager;
pub use messaging::MessagingManager;
pub use network::NetworkManager;
pub use secret::SecretManager;
pub use storage::StorageManager;
pub use synth::synthesize;
