//! Storage resource managers (buckets, tables)

use crate::environment::Environment;
use crate::error::Result;
use formwork_core::model::Blueprint;
use formwork_core::{NamingContext, merge, resolve};
use formwork_synth::logical_id::camel_case;
use formwork_synth::{Output, Resource, Stack, get_att, reference};
use serde_json::{Value, json};
use tracing::debug;

/// Manager for storage resources
pub struct StorageManager<'a> {
    naming: &'a NamingContext,
    environment: &'a Environment,
}

impl<'a> StorageManager<'a> {
    pub fn new(naming: &'a NamingContext, environment: &'a Environment) -> Self {
        Self {
            naming,
            environment,
        }
    }

    /// Declare a bucket from the `buckets` collection
    ///
    /// Registers outputs for the generated name, ARN and domain name.
    /// Returns the logical id of the declared resource.
    pub fn add_bucket(
        &self,
        stack: &mut Stack,
        blueprint: &Blueprint,
        key: &str,
    ) -> Result<String> {
        let entry = resolve(blueprint.buckets.as_deref(), "buckets", key)?;
        let bucket_name = self
            .naming
            .resource_name_with(&entry.name, entry.skip_stage_suffix);

        let mut defaults = json!({
            "BucketName": bucket_name,
            "Tags": self.environment.default_tags(self.naming),
        });
        if entry.versioned {
            defaults["VersioningConfiguration"] = json!({"Status": "Enabled"});
        }
        if entry.public_read {
            defaults["PublicAccessBlockConfiguration"] = json!({
                "BlockPublicAcls": false,
                "BlockPublicPolicy": false,
                "IgnorePublicAcls": false,
                "RestrictPublicBuckets": false,
            });
        }
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-bucket", entry.key));
        debug!(key = %entry.key, name = %bucket_name, "Declaring bucket");
        stack.add_resource(&logical, Resource::new("AWS::S3::Bucket", properties))?;

        stack.add_output(Output::new(
            format!("{}-bucket-name", entry.key),
            reference(&logical),
        ))?;
        stack.add_output(
            Output::new(format!("{}-bucket-arn", entry.key), get_att(&logical, "Arn"))
                .with_description(format!("ARN of bucket {}", bucket_name)),
        )?;
        stack.add_output(Output::new(
            format!("{}-bucket-domain", entry.key),
            get_att(&logical, "DomainName"),
        ))?;

        Ok(logical)
    }

    /// Declare a table from the `tables` collection
    ///
    /// Registers outputs for the generated name and ARN.
    pub fn add_table(
        &self,
        stack: &mut Stack,
        blueprint: &Blueprint,
        key: &str,
    ) -> Result<String> {
        let entry = resolve(blueprint.tables.as_deref(), "tables", key)?;
        let table_name = self
            .naming
            .resource_name_with(&entry.name, entry.skip_stage_suffix);

        let mut attributes = vec![json!({"AttributeName": entry.hash_key, "AttributeType": "S"})];
        let mut key_schema = vec![json!({"AttributeName": entry.hash_key, "KeyType": "HASH"})];
        if let Some(range_key) = &entry.range_key {
            attributes.push(json!({"AttributeName": range_key, "AttributeType": "S"}));
            key_schema.push(json!({"AttributeName": range_key, "KeyType": "RANGE"}));
        }

        let mut defaults = json!({
            "TableName": table_name,
            "AttributeDefinitions": attributes,
            "KeySchema": key_schema,
            "BillingMode": "PAY_PER_REQUEST",
            "Tags": self.environment.default_tags(self.naming),
        });
        if entry.stream {
            defaults["StreamSpecification"] = json!({"StreamViewType": "NEW_AND_OLD_IMAGES"});
        }
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-table", entry.key));
        debug!(key = %entry.key, name = %table_name, "Declaring table");
        stack.add_resource(&logical, Resource::new("AWS::DynamoDB::Table", properties))?;

        stack.add_output(Output::new(
            format!("{}-table-name", entry.key),
            reference(&logical),
        ))?;
        stack.add_output(Output::new(
            format!("{}-table-arn", entry.key),
            get_att(&logical, "Arn"),
        ))?;

        Ok(logical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AwsError;
    use formwork_core::ResolveError;
    use formwork_core::model::{BucketConfig, TableConfig};

    fn naming() -> NamingContext {
        NamingContext::new("media-stack", "dev").unwrap()
    }

    fn blueprint_with_bucket() -> Blueprint {
        Blueprint {
            name: "media-stack".to_string(),
            buckets: Some(vec![BucketConfig {
                key: "assets".to_string(),
                name: "media-assets".to_string(),
                versioned: true,
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_bucket_declares_resource_and_outputs() {
        let naming = naming();
        let environment = Environment::default();
        let manager = StorageManager::new(&naming, &environment);
        let blueprint = blueprint_with_bucket();
        let mut stack = Stack::new("media-stack");

        let logical = manager
            .add_bucket(&mut stack, &blueprint, "assets")
            .unwrap();
        assert_eq!(logical, "assetsBucket");

        let resource = &stack.resources()["assetsBucket"];
        assert_eq!(resource.resource_type, "AWS::S3::Bucket");
        assert_eq!(resource.properties["BucketName"], "media-assets-dev");
        assert_eq!(
            resource.properties["VersioningConfiguration"]["Status"],
            "Enabled"
        );

        assert!(stack.outputs().contains_key("assetsBucketName"));
        assert!(stack.outputs().contains_key("assetsBucketArn"));
        assert!(stack.outputs().contains_key("assetsBucketDomain"));
    }

    #[test]
    fn test_add_bucket_passthrough_overrides_defaults() {
        let naming = naming();
        let environment = Environment::default();
        let manager = StorageManager::new(&naming, &environment);

        let mut blueprint = blueprint_with_bucket();
        let bucket = &mut blueprint.buckets.as_mut().unwrap()[0];
        bucket.extra.insert(
            "BucketName".to_string(),
            serde_json::json!("explicit-name"),
        );
        bucket
            .extra
            .insert("ObjectLockEnabled".to_string(), serde_json::json!(true));

        let mut stack = Stack::new("media-stack");
        manager
            .add_bucket(&mut stack, &blueprint, "assets")
            .unwrap();

        let resource = &stack.resources()["assetsBucket"];
        // Entry-level configuration wins over the computed default
        assert_eq!(resource.properties["BucketName"], "explicit-name");
        assert_eq!(resource.properties["ObjectLockEnabled"], true);
    }

    #[test]
    fn test_add_bucket_unknown_key_fails_fast() {
        let naming = naming();
        let environment = Environment::default();
        let manager = StorageManager::new(&naming, &environment);
        let blueprint = blueprint_with_bucket();
        let mut stack = Stack::new("media-stack");

        let result = manager.add_bucket(&mut stack, &blueprint, "missing");
        assert!(matches!(
            result,
            Err(AwsError::Resolve(ResolveError::ConfigurationNotFound { .. }))
        ));
        // Nothing was declared
        assert!(stack.resources().is_empty());
        assert!(stack.outputs().is_empty());
    }

    #[test]
    fn test_add_bucket_missing_collection_fails_fast() {
        let naming = naming();
        let environment = Environment::default();
        let manager = StorageManager::new(&naming, &environment);
        let blueprint = Blueprint::default();
        let mut stack = Stack::new("media-stack");

        let result = manager.add_bucket(&mut stack, &blueprint, "assets");
        assert!(matches!(
            result,
            Err(AwsError::Resolve(ResolveError::ConfigurationMissing { .. }))
        ));
    }

    #[test]
    fn test_add_table_with_range_key_and_stream() {
        let naming = naming();
        let environment = Environment::default();
        let manager = StorageManager::new(&naming, &environment);

        let blueprint = Blueprint {
            tables: Some(vec![TableConfig {
                key: "sessions".to_string(),
                name: "media-sessions".to_string(),
                hash_key: "pk".to_string(),
                range_key: Some("sk".to_string()),
                stream: true,
                ..Default::default()
            }]),
            ..Default::default()
        };

        let mut stack = Stack::new("media-stack");
        let logical = manager
            .add_table(&mut stack, &blueprint, "sessions")
            .unwrap();

        let resource = &stack.resources()[&logical];
        assert_eq!(resource.resource_type, "AWS::DynamoDB::Table");
        assert_eq!(resource.properties["TableName"], "media-sessions-dev");
        assert_eq!(resource.properties["KeySchema"][1]["KeyType"], "RANGE");
        assert_eq!(
            resource.properties["StreamSpecification"]["StreamViewType"],
            "NEW_AND_OLD_IMAGES"
        );
        assert!(stack.outputs().contains_key("sessionsTableArn"));
    }
}
