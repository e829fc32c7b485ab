//! Secret resource manager

use crate::environment::Environment;
use crate::error::Result;
use formwork_core::model::Blueprint;
use formwork_core::{NamingContext, merge, resolve};
use formwork_synth::logical_id::camel_case;
use formwork_synth::{Output, Resource, Stack, reference};
use serde_json::{Value, json};
use tracing::debug;

/// Manager for secret resources
pub struct SecretManager<'a> {
    naming: &'a NamingContext,
    environment: &'a Environment,
}

impl<'a> SecretManager<'a> {
    pub fn new(naming: &'a NamingContext, environment: &'a Environment) -> Self {
        Self {
            naming,
            environment,
        }
    }

    /// Declare a secret from the `secrets` collection
    ///
    /// Only the container is declared; secret values are never part of
    /// the blueprint or the rendered template.
    pub fn add_secret(
        &self,
        stack: &mut Stack,
        blueprint: &Blueprint,
        key: &str,
    ) -> Result<String> {
        let entry = resolve(blueprint.secrets.as_deref(), "secrets", key)?;
        let secret_name = self
            .naming
            .resource_name_with(&entry.name, entry.skip_stage_suffix);

        let mut defaults = json!({
            "Name": secret_name,
            "Tags": self.environment.default_tags(self.naming),
        });
        if let Some(description) = &entry.description {
            defaults["Description"] = json!(description);
        }
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-secret", entry.key));
        debug!(key = %entry.key, name = %secret_name, "Declaring secret");
        stack.add_resource(
            &logical,
            Resource::new("AWS::SecretsManager::Secret", properties),
        )?;

        // For secrets the primary reference is the ARN
        stack.add_output(Output::new(
            format!("{}-secret-arn", entry.key),
            reference(&logical),
        ))?;

        Ok(logical)
    }
}
