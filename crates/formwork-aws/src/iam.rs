//! IAM resource managers (roles, policies)

use crate::environment::Environment;
use crate::error::Result;
use formwork_core::model::Blueprint;
use formwork_core::{NamingContext, merge, resolve};
use formwork_synth::logical_id::camel_case;
use formwork_synth::{Output, Resource, Stack, get_att, reference};
use serde_json::{Value, json};
use tracing::debug;

/// Manager for IAM resources
pub struct IamManager<'a> {
    naming: &'a NamingContext,
    environment: &'a Environment,
}

impl<'a> IamManager<'a> {
    pub fn new(naming: &'a NamingContext, environment: &'a Environment) -> Self {
        Self {
            naming,
            environment,
        }
    }

    /// Declare a managed policy from the `policies` collection
    ///
    /// Statements are passed through to the policy document unvalidated.
    pub fn add_policy(
        &self,
        stack: &mut Stack,
        blueprint: &Blueprint,
        key: &str,
    ) -> Result<String> {
        let entry = resolve(blueprint.policies.as_deref(), "policies", key)?;
        let policy_name = self
            .naming
            .resource_name_with(&entry.name, entry.skip_stage_suffix);

        let defaults = json!({
            "ManagedPolicyName": policy_name,
            "PolicyDocument": {
                "Version": "2012-10-17",
                "Statement": entry.statements,
            },
        });
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-policy", entry.key));
        debug!(key = %entry.key, name = %policy_name, "Declaring managed policy");
        stack.add_resource(&logical, Resource::new("AWS::IAM::ManagedPolicy", properties))?;

        stack.add_output(Output::new(
            format!("{}-policy-arn", entry.key),
            reference(&logical),
        ))?;

        Ok(logical)
    }

    /// Declare a role from the `roles` collection
    ///
    /// Policies referenced by key are resolved from the `policies`
    /// collection and attached by reference; a missing policy key fails
    /// the whole call before anything is declared.
    pub fn add_role(&self, stack: &mut Stack, blueprint: &Blueprint, key: &str) -> Result<String> {
        let entry = resolve(blueprint.roles.as_deref(), "roles", key)?;
        let role_name = self
            .naming
            .resource_name_with(&entry.name, entry.skip_stage_suffix);

        // Resolve referenced policies up front so a bad reference
        // declares nothing.
        let mut policy_arns: Vec<Value> = Vec::new();
        for policy_key in &entry.policies {
            let policy = resolve(blueprint.policies.as_deref(), "policies", policy_key)?;
            let policy_logical = camel_case(&format!("{}-policy", policy.key));
            policy_arns.push(reference(&policy_logical));
        }
        for arn in &entry.managed_policies {
            policy_arns.push(json!(arn));
        }

        let defaults = json!({
            "RoleName": role_name,
            "AssumeRolePolicyDocument": {
                "Version": "2012-10-17",
                "Statement": [{
                    "Effect": "Allow",
                    "Principal": {"Service": entry.service},
                    "Action": "sts:AssumeRole",
                }],
            },
            "ManagedPolicyArns": policy_arns,
            "Tags": self.environment.default_tags(self.naming),
        });
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-role", entry.key));
        debug!(key = %entry.key, name = %role_name, "Declaring role");
        stack.add_resource(&logical, Resource::new("AWS::IAM::Role", properties))?;

        stack.add_output(Output::new(
            format!("{}-role-name", entry.key),
            reference(&logical),
        ))?;
        stack.add_output(Output::new(
            format!("{}-role-arn", entry.key),
            get_att(&logical, "Arn"),
        ))?;

        Ok(logical)
    }
}
