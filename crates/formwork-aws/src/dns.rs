//! DNS record manager

use crate::environment::Environment;
use crate::error::Result;
use formwork_core::model::Blueprint;
use formwork_core::{NamingContext, merge, resolve};
use formwork_synth::logical_id::camel_case;
use formwork_synth::{Output, Resource, Stack, reference};
use serde_json::{Value, json};
use tracing::debug;

/// Manager for DNS records
pub struct DnsManager<'a> {
    naming: &'a NamingContext,
    #[allow(dead_code)]
    environment: &'a Environment,
}

impl<'a> DnsManager<'a> {
    pub fn new(naming: &'a NamingContext, environment: &'a Environment) -> Self {
        Self {
            naming,
            environment,
        }
    }

    /// Declare a record from the `records` collection
    ///
    /// The record name gets the stage suffix like any other resource, so
    /// `cdn` in stage `dev` under zone `example.com` becomes
    /// `cdn-dev.example.com`.
    pub fn add_record(
        &self,
        stack: &mut Stack,
        blueprint: &Blueprint,
        key: &str,
    ) -> Result<String> {
        let entry = resolve(blueprint.records.as_deref(), "records", key)?;
        let record_label = self
            .naming
            .resource_name_with(&entry.name, entry.skip_stage_suffix);
        let record_name = format!("{}.{}.", record_label, entry.zone);

        let defaults = json!({
            "Name": record_name,
            "HostedZoneName": format!("{}.", entry.zone),
            "Type": entry.record_type,
            "TTL": entry.ttl.to_string(),
            "ResourceRecords": [entry.value],
        });
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-record", entry.key));
        debug!(key = %entry.key, name = %record_name, "Declaring record");
        stack.add_resource(&logical, Resource::new("AWS::Route53::RecordSet", properties))?;

        stack.add_output(Output::new(
            format!("{}-record-name", entry.key),
            reference(&logical),
        ))?;

        Ok(logical)
    }
}
