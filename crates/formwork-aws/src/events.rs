//! Event rule manager

use crate::environment::Environment;
use crate::error::{AwsError, Result};
use formwork_core::model::Blueprint;
use formwork_core::{NamingContext, merge, resolve};
use formwork_synth::logical_id::camel_case;
use formwork_synth::{Output, Resource, Stack, get_att};
use serde_json::{Value, json};
use tracing::debug;

/// Manager for event rules
pub struct EventsManager<'a> {
    naming: &'a NamingContext,
    #[allow(dead_code)]
    environment: &'a Environment,
}

impl<'a> EventsManager<'a> {
    pub fn new(naming: &'a NamingContext, environment: &'a Environment) -> Self {
        Self {
            naming,
            environment,
        }
    }

    /// Declare a rule from the `rules` collection
    ///
    /// The rule carries either a schedule expression or an event pattern.
    /// Target functions are resolved from the `functions` collection; a
    /// missing target key fails the call before anything is declared.
    pub fn add_rule(&self, stack: &mut Stack, blueprint: &Blueprint, key: &str) -> Result<String> {
        let entry = resolve(blueprint.rules.as_deref(), "rules", key)?;
        let rule_name = self
            .naming
            .resource_name_with(&entry.name, entry.skip_stage_suffix);

        if entry.schedule.is_none() && entry.pattern.is_none() {
            return Err(AwsError::InvalidConfig(format!(
                "rule \"{}\" needs either a schedule or an event pattern",
                entry.key
            )));
        }

        let mut targets: Vec<Value> = Vec::new();
        let mut target_logicals: Vec<String> = Vec::new();
        for function_key in &entry.targets {
            let function = resolve(blueprint.functions.as_deref(), "functions", function_key)?;
            let function_logical = camel_case(&format!("{}-function", function.key));
            targets.push(json!({
                "Arn": get_att(&function_logical, "Arn"),
                "Id": function.key,
            }));
            target_logicals.push(function_logical);
        }

        let mut defaults = json!({
            "Name": rule_name,
            "State": "ENABLED",
        });
        if let Some(schedule) = &entry.schedule {
            defaults["ScheduleExpression"] = json!(schedule);
        }
        if let Some(pattern) = &entry.pattern {
            defaults["EventPattern"] = pattern.clone();
        }
        if !targets.is_empty() {
            defaults["Targets"] = json!(targets);
        }
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-rule", entry.key));
        debug!(key = %entry.key, name = %rule_name, "Declaring rule");

        let mut resource = Resource::new("AWS::Events::Rule", properties);
        for target_logical in target_logicals {
            resource = resource.with_dependency(target_logical);
        }
        stack.add_resource(&logical, resource)?;

        stack.add_output(Output::new(
            format!("{}-rule-arn", entry.key),
            get_att(&logical, "Arn"),
        ))?;

        Ok(logical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork_core::model::{FunctionConfig, RuleConfig};

    fn blueprint() -> Blueprint {
        Blueprint {
            rules: Some(vec![RuleConfig {
                key: "cleanup".to_string(),
                name: "media-cleanup".to_string(),
                schedule: Some("rate(1 hour)".to_string()),
                targets: vec!["resize".to_string()],
                ..Default::default()
            }]),
            functions: Some(vec![FunctionConfig {
                key: "resize".to_string(),
                name: "media-resize".to_string(),
                skip_stage_suffix: false,
                handler: "index.handler".to_string(),
                runtime: "nodejs20.x".to_string(),
                memory: None,
                timeout: None,
                role: None,
                environment: Default::default(),
                extra: serde_json::Map::new(),
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_rule_with_schedule_and_target() {
        let naming = NamingContext::new("media-stack", "dev").unwrap();
        let environment = Environment::default();
        let manager = EventsManager::new(&naming, &environment);
        let blueprint = blueprint();
        let mut stack = Stack::new("media-stack");

        let logical = manager.add_rule(&mut stack, &blueprint, "cleanup").unwrap();
        assert_eq!(logical, "cleanupRule");

        let resource = &stack.resources()["cleanupRule"];
        assert_eq!(resource.properties["ScheduleExpression"], "rate(1 hour)");
        assert_eq!(resource.properties["Targets"][0]["Id"], "resize");
        assert_eq!(resource.depends_on, vec!["resizeFunction"]);
        assert!(stack.outputs().contains_key("cleanupRuleArn"));
    }

    #[test]
    fn test_add_rule_without_schedule_or_pattern_is_invalid() {
        let naming = NamingContext::new("media-stack", "dev").unwrap();
        let environment = Environment::default();
        let manager = EventsManager::new(&naming, &environment);

        let mut blueprint = blueprint();
        blueprint.rules.as_mut().unwrap()[0].schedule = None;
        let mut stack = Stack::new("media-stack");

        let result = manager.add_rule(&mut stack, &blueprint, "cleanup");
        assert!(matches!(result, Err(AwsError::InvalidConfig(_))));
        assert!(stack.resources().is_empty());
    }
}
