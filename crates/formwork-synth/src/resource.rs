//! Resource declarations and reference tokens

use serde::{Deserialize, Serialize};
use serde_json::json;

/// A declared resource
///
/// Properties are passed through to the template document untouched;
/// validation of provider-specific fields is the deployment engine's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Provider resource type (e.g., "AWS::S3::Bucket")
    #[serde(rename = "Type")]
    pub resource_type: String,

    /// Resource properties
    #[serde(rename = "Properties")]
    pub properties: serde_json::Value,

    /// Logical ids of resources that must be created first
    #[serde(rename = "DependsOn", default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>, properties: serde_json::Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties,
            depends_on: Vec::new(),
        }
    }

    /// Add an explicit creation-order dependency
    pub fn with_dependency(mut self, logical_id: impl Into<String>) -> Self {
        self.depends_on.push(logical_id.into());
        self
    }
}

/// Reference token for a resource's primary identifier
///
/// The deployment engine substitutes the generated identifier (name, id)
/// when the template is applied.
pub fn reference(logical_id: &str) -> serde_json::Value {
    json!({ "Ref": logical_id })
}

/// Reference token for a generated resource attribute (e.g., "Arn")
pub fn get_att(logical_id: &str, attribute: &str) -> serde_json::Value {
    json!({ "Fn::GetAtt": [logical_id, attribute] })
}
