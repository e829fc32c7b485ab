//! Stack outputs
//!
//! Outputs publish generated identifiers (ARN, name, id, domain) of
//! synthesized resources so other stacks and tooling can import them.

use serde::{Deserialize, Serialize};

/// An output registration request
///
/// The id is normalized to a camel-case logical id unless
/// `with_logical_id_override` is set, in which case it is used verbatim
/// (still subject to validation).
#[derive(Debug, Clone)]
pub struct Output {
    /// Logical name of the output
    pub id: String,

    /// Output value; a plain string (possibly empty) or a reference token
    pub value: serde_json::Value,

    /// Human-readable description
    pub description: Option<String>,

    /// Use the id verbatim instead of normalizing it
    pub override_logical_id: bool,
}

impl Output {
    pub fn new(id: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            description: None,
            override_logical_id: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_logical_id_override(mut self) -> Self {
        self.override_logical_id = true;
        self
    }
}

/// A registered output as it appears in the template document
///
/// Created once at registration, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Output value
    #[serde(rename = "Value")]
    pub value: serde_json::Value,

    /// Human-readable description
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Cross-stack export
    #[serde(rename = "Export", skip_serializing_if = "Option::is_none")]
    pub export: Option<Export>,
}

/// Cross-stack export name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Export {
    /// Export name, scoped by the owning stack's name
    #[serde(rename = "Name")]
    pub name: String,
}
