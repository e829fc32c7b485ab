//! Function manager

use crate::environment::Environment;
use crate::error::Result;
use formwork_core::model::Blueprint;
use formwork_core::{NamingContext, merge, resolve};
use formwork_synth::logical_id::camel_case;
use formwork_synth::{Output, Resource, Stack, get_att, reference};
use serde_json::{Value, json};
use tracing::debug;

/// Manager for function resources
pub struct FunctionManager<'a> {
    naming: &'a NamingContext,
    environment: &'a Environment,
}

impl<'a> FunctionManager<'a> {
    pub fn new(naming: &'a NamingContext, environment: &'a Environment) -> Self {
        Self {
            naming,
            environment,
        }
    }

    /// Declare a function from the `functions` collection
    ///
    /// The execution role is resolved by key from the `roles` collection
    /// and wired by reference. The deployment stage is always injected
    /// into the function environment as `STAGE`.
    pub fn add_function(
        &self,
        stack: &mut Stack,
        blueprint: &Blueprint,
        key: &str,
    ) -> Result<String> {
        let entry = resolve(blueprint.functions.as_deref(), "functions", key)?;
        let function_name = self
            .naming
            .resource_name_with(&entry.name, entry.skip_stage_suffix);

        // Resolve the execution role before declaring anything
        let role_logical = match &entry.role {
            Some(role_key) => {
                let role = resolve(blueprint.roles.as_deref(), "roles", role_key)?;
                Some(camel_case(&format!("{}-role", role.key)))
            }
            None => None,
        };

        let mut variables = serde_json::Map::new();
        variables.insert("STAGE".to_string(), json!(self.naming.stage()));
        for (name, value) in &entry.environment {
            variables.insert(name.clone(), json!(value));
        }

        let mut defaults = json!({
            "FunctionName": function_name,
            "Handler": entry.handler,
            "Runtime": entry.runtime,
            "Environment": {"Variables": variables},
            "Tags": self.environment.default_tags(self.naming),
        });
        if let Some(role_logical) = &role_logical {
            defaults["Role"] = get_att(role_logical, "Arn");
        }
        if let Some(memory) = entry.memory {
            defaults["MemorySize"] = json!(memory);
        }
        if let Some(timeout) = entry.timeout {
            defaults["Timeout"] = json!(timeout);
        }
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-function", entry.key));
        debug!(key = %entry.key, name = %function_name, "Declaring function");

        let mut resource = Resource::new("AWS::Lambda::Function", properties);
        if let Some(role_logical) = role_logical {
            resource = resource.with_dependency(role_logical);
        }
        stack.add_resource(&logical, resource)?;

        stack.add_output(Output::new(
            format!("{}-function-name", entry.key),
            reference(&logical),
        ))?;
        stack.add_output(Output::new(
            format!("{}-function-arn", entry.key),
            get_att(&logical, "Arn"),
        ))?;

        Ok(logical)
    }
}
