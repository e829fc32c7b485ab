//! Stack: the synthesis surface managers register against
//!
//! A stack collects resource declarations and output registrations and
//! renders them into a template document. Both maps are keyed by logical
//! id; registration order does not affect the rendered result.

use crate::error::{Result, SynthError};
use crate::logical_id;
use crate::output::{Export, Output, OutputRecord};
use crate::resource::Resource;
use crate::template::Template;
use std::collections::BTreeMap;

/// A stack under synthesis
#[derive(Debug, Clone)]
pub struct Stack {
    name: String,
    description: Option<String>,
    resources: BTreeMap<String, Resource>,
    outputs: BTreeMap<String, OutputRecord>,
}

impl Stack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Stack name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declare a resource under the given logical id
    ///
    /// The id must already be a valid logical id; duplicates are rejected.
    pub fn add_resource(&mut self, id: impl Into<String>, resource: Resource) -> Result<()> {
        let id = id.into();
        logical_id::validate(&id)?;

        if self.resources.contains_key(&id) {
            return Err(SynthError::DuplicateResource(id));
        }

        tracing::debug!(logical_id = %id, resource_type = %resource.resource_type, "Declaring resource");
        self.resources.insert(id, resource);
        Ok(())
    }

    /// Register an output
    ///
    /// The id is normalized to camel case unless the registration carries
    /// the logical-id override flag. The export name is scoped by the
    /// stack name. Registering the same logical id twice is an error;
    /// no deduplication or merging is attempted here.
    ///
    /// Returns the logical id the output was registered under.
    pub fn add_output(&mut self, output: Output) -> Result<String> {
        let id = if output.override_logical_id {
            output.id.clone()
        } else {
            logical_id::camel_case(&output.id)
        };
        logical_id::validate(&id)?;

        if self.outputs.contains_key(&id) {
            return Err(SynthError::DuplicateOutput(id));
        }

        let record = OutputRecord {
            value: output.value,
            description: output.description,
            export: Some(Export {
                name: format!("{}-{}", self.name, id),
            }),
        };

        tracing::debug!(logical_id = %id, "Registering output");
        self.outputs.insert(id.clone(), record);
        Ok(id)
    }

    /// Declared resources, keyed by logical id
    pub fn resources(&self) -> &BTreeMap<String, Resource> {
        &self.resources
    }

    /// Registered outputs, keyed by logical id
    pub fn outputs(&self) -> &BTreeMap<String, OutputRecord> {
        &self.outputs
    }

    /// Render the template document
    pub fn to_template(&self) -> Template {
        Template::from_stack(self)
    }

    pub(crate) fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::get_att;
    use serde_json::json;

    #[test]
    fn test_add_resource_rejects_duplicates() {
        let mut stack = Stack::new("media-stack");
        stack
            .add_resource("assetsBucket", Resource::new("AWS::S3::Bucket", json!({})))
            .unwrap();

        let result = stack.add_resource("assetsBucket", Resource::new("AWS::S3::Bucket", json!({})));
        assert!(matches!(result, Err(SynthError::DuplicateResource(id)) if id == "assetsBucket"));
    }

    #[test]
    fn test_add_output_normalizes_id() {
        let mut stack = Stack::new("media-stack");
        let id = stack
            .add_output(Output::new("bucket-arn", get_att("assetsBucket", "Arn")))
            .unwrap();

        assert_eq!(id, "bucketArn");
        let record = &stack.outputs()["bucketArn"];
        assert_eq!(record.export.as_ref().unwrap().name, "media-stack-bucketArn");
    }

    #[test]
    fn test_add_output_override_keeps_id_verbatim() {
        let mut stack = Stack::new("media-stack");
        let id = stack
            .add_output(
                Output::new("BucketArn", json!("")).with_logical_id_override(),
            )
            .unwrap();

        assert_eq!(id, "BucketArn");
        // An invalid verbatim id is still rejected
        let result = stack.add_output(
            Output::new("bucket-arn", json!("")).with_logical_id_override(),
        );
        assert!(matches!(result, Err(SynthError::InvalidLogicalId { .. })));
    }

    #[test]
    fn test_add_output_rejects_duplicates() {
        let mut stack = Stack::new("media-stack");
        stack.add_output(Output::new("bucketArn", json!("a"))).unwrap();

        // Normalization maps bucket-arn onto the already-registered id
        let result = stack.add_output(Output::new("bucket-arn", json!("b")));
        assert!(matches!(result, Err(SynthError::DuplicateOutput(id)) if id == "bucketArn"));
    }

    #[test]
    fn test_output_registration_is_order_independent() {
        let mut first = Stack::new("media-stack");
        first.add_output(Output::new("bucketArn", json!("a"))).unwrap();
        first.add_output(Output::new("bucketName", json!("b"))).unwrap();

        let mut second = Stack::new("media-stack");
        second.add_output(Output::new("bucketName", json!("b"))).unwrap();
        second.add_output(Output::new("bucketArn", json!("a"))).unwrap();

        let rendered_first = first.to_template().to_json().unwrap();
        let rendered_second = second.to_template().to_json().unwrap();
        assert_eq!(rendered_first, rendered_second);
    }

    #[test]
    fn test_empty_output_value_is_accepted() {
        let mut stack = Stack::new("media-stack");
        stack.add_output(Output::new("apiDomain", json!(""))).unwrap();
        assert_eq!(stack.outputs()["apiDomain"].value, json!(""));
    }
}
