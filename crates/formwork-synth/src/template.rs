//! Template document rendering
//!
//! The rendered document is the synthesis artifact: a CloudFormation-style
//! JSON template with `Resources` and `Outputs` sections. Map keys are
//! sorted, so rendering is deterministic regardless of declaration order.

use crate::error::Result;
use crate::output::OutputRecord;
use crate::resource::Resource;
use crate::stack::Stack;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

const FORMAT_VERSION: &str = "2010-09-09";

/// Synthesized template document
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    format_version: String,

    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(rename = "Resources")]
    resources: BTreeMap<String, Resource>,

    #[serde(rename = "Outputs", skip_serializing_if = "BTreeMap::is_empty")]
    outputs: BTreeMap<String, OutputRecord>,
}

impl Template {
    pub(crate) fn from_stack(stack: &Stack) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            description: stack.description().map(|d| d.to_string()),
            resources: stack.resources().clone(),
            outputs: stack.outputs().clone(),
        }
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the rendered document to a file
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), "Wrote template");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Output;
    use crate::resource::{Resource, get_att};
    use serde_json::json;

    #[test]
    fn test_template_shape() {
        let mut stack = Stack::new("media-stack").with_description("Media resources");
        stack
            .add_resource(
                "assetsBucket",
                Resource::new("AWS::S3::Bucket", json!({"BucketName": "media-assets-dev"})),
            )
            .unwrap();
        stack
            .add_output(
                Output::new("bucket-arn", get_att("assetsBucket", "Arn"))
                    .with_description("Assets bucket ARN"),
            )
            .unwrap();

        let rendered = stack.to_template().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["AWSTemplateFormatVersion"], "2010-09-09");
        assert_eq!(value["Description"], "Media resources");
        assert_eq!(
            value["Resources"]["assetsBucket"]["Type"],
            "AWS::S3::Bucket"
        );
        assert_eq!(
            value["Outputs"]["bucketArn"]["Value"],
            json!({"Fn::GetAtt": ["assetsBucket", "Arn"]})
        );
        assert_eq!(
            value["Outputs"]["bucketArn"]["Export"]["Name"],
            "media-stack-bucketArn"
        );
    }

    #[test]
    fn test_empty_outputs_section_is_omitted() {
        let stack = Stack::new("media-stack");
        let rendered = stack.to_template().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value.get("Outputs").is_none());
    }

    #[test]
    fn test_write_to_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out/media.dev.template.json");

        let stack = Stack::new("media-stack");
        stack.to_template().write_to(&path).unwrap();

        assert!(path.exists());
    }
}
