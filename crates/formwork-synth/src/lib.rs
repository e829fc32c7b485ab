//! Formwork Synthesis Surface
//!
//! This crate is the host surface resource managers register against:
//! a stack value that collects resource declarations and output
//! registrations and renders them into a CloudFormation-style template
//! document.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 Formwork CLI                     │
//! │                 (form synth)                     │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               formwork-aws                       │
//! │  managers: resolve → name → construct → output   │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │              formwork-synth                      │
//! │  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │
//! │  │  Stack   │  │ Outputs  │  │   Template   │   │
//! │  └──────────┘  └──────────┘  └──────────────┘   │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Registration is order-independent: the rendered document keys both
//! sections by logical id in sorted order. Duplicate logical ids are
//! rejected at registration time.

pub mod error;
pub mod logical_id;
pub mod output;
pub mod resource;
pub mod stack;
pub mod template;

// Re-exports
pub use error::{Result, SynthError};
pub use output::{Export, Output, OutputRecord};
pub use resource::{Resource, get_att, reference};
pub use stack::Stack;
pub use template::Template;
