//! Certificate manager

use crate::environment::Environment;
use crate::error::Result;
use formwork_core::model::Blueprint;
use formwork_core::{NamingContext, merge, resolve};
use formwork_synth::logical_id::camel_case;
use formwork_synth::{Output, Resource, Stack, reference};
use serde_json::{Value, json};
use tracing::debug;

/// Manager for certificates
pub struct CertificateManager<'a> {
    naming: &'a NamingContext,
    environment: &'a Environment,
}

impl<'a> CertificateManager<'a> {
    pub fn new(naming: &'a NamingContext, environment: &'a Environment) -> Self {
        Self {
            naming,
            environment,
        }
    }

    /// Declare a certificate from the `certificates` collection
    ///
    /// Validation is DNS-based; when a hosted zone is configured the
    /// validation records are created in it automatically.
    pub fn add_certificate(
        &self,
        stack: &mut Stack,
        blueprint: &Blueprint,
        key: &str,
    ) -> Result<String> {
        let entry = resolve(blueprint.certificates.as_deref(), "certificates", key)?;

        let mut defaults = json!({
            "DomainName": entry.domain_name,
            "ValidationMethod": "DNS",
            "Tags": self.environment.default_tags(self.naming),
        });
        if !entry.subject_alternative_names.is_empty() {
            defaults["SubjectAlternativeNames"] = json!(entry.subject_alternative_names);
        }
        if let Some(hosted_zone) = &entry.hosted_zone {
            defaults["DomainValidationOptions"] = json!([{
                "DomainName": entry.domain_name,
                "HostedZoneName": format!("{}.", hosted_zone),
            }]);
        }
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-certificate", entry.key));
        debug!(key = %entry.key, domain = %entry.domain_name, "Declaring certificate");
        stack.add_resource(
            &logical,
            Resource::new("AWS::CertificateManager::Certificate", properties),
        )?;

        // For certificates the primary reference is the ARN
        stack.add_output(
            Output::new(format!("{}-certificate-arn", entry.key), reference(&logical))
                .with_description(format!("Certificate ARN for {}", entry.domain_name)),
        )?;

        Ok(logical)
    }
}
