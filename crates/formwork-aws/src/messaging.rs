//! Messaging resource managers (queues, topics)

use crate::environment::Environment;
use crate::error::Result;
use formwork_core::model::Blueprint;
use formwork_core::{NamingContext, merge, resolve};
use formwork_synth::logical_id::camel_case;
use formwork_synth::{Output, Resource, Stack, get_att, reference};
use serde_json::{Value, json};
use tracing::debug;

/// Manager for messaging resources
pub struct MessagingManager<'a> {
    naming: &'a NamingContext,
    environment: &'a Environment,
}

impl<'a> MessagingManager<'a> {
    pub fn new(naming: &'a NamingContext, environment: &'a Environment) -> Self {
        Self {
            naming,
            environment,
        }
    }

    /// Declare a queue from the `queues` collection
    ///
    /// When `dead_letter` is set, a companion DLQ is declared and wired
    /// via a redrive policy. FIFO queue names carry the required suffix.
    pub fn add_queue(&self, stack: &mut Stack, blueprint: &Blueprint, key: &str) -> Result<String> {
        let entry = resolve(blueprint.queues.as_deref(), "queues", key)?;
        let base_name = self
            .naming
            .resource_name_with(&entry.name, entry.skip_stage_suffix);
        let queue_name = fifo_name(&base_name, entry.fifo);

        let mut dlq_logical = None;
        if entry.dead_letter {
            let logical = camel_case(&format!("{}-dead-letter-queue", entry.key));
            let dlq_name = fifo_name(&format!("{}-dlq", base_name), entry.fifo);

            let mut dlq_properties = json!({
                "QueueName": dlq_name,
                "Tags": self.environment.default_tags(self.naming),
            });
            if entry.fifo {
                dlq_properties["FifoQueue"] = json!(true);
            }

            debug!(key = %entry.key, name = %dlq_name, "Declaring dead letter queue");
            stack.add_resource(&logical, Resource::new("AWS::SQS::Queue", dlq_properties))?;

            stack.add_output(Output::new(
                format!("{}-dead-letter-queue-arn", entry.key),
                get_att(&logical, "Arn"),
            ))?;
            dlq_logical = Some(logical);
        }

        let mut defaults = json!({
            "QueueName": queue_name,
            "Tags": self.environment.default_tags(self.naming),
        });
        if entry.fifo {
            defaults["FifoQueue"] = json!(true);
        }
        if let Some(timeout) = entry.visibility_timeout {
            defaults["VisibilityTimeout"] = json!(timeout);
        }
        if let Some(dlq_logical) = &dlq_logical {
            defaults["RedrivePolicy"] = json!({
                "deadLetterTargetArn": get_att(dlq_logical, "Arn"),
                "maxReceiveCount": entry.max_receive_count,
            });
        }
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-queue", entry.key));
        debug!(key = %entry.key, name = %queue_name, "Declaring queue");

        let mut resource = Resource::new("AWS::SQS::Queue", properties);
        if let Some(dlq_logical) = dlq_logical {
            resource = resource.with_dependency(dlq_logical);
        }
        stack.add_resource(&logical, resource)?;

        // For queues the primary reference is the URL
        stack.add_output(Output::new(
            format!("{}-queue-url", entry.key),
            reference(&logical),
        ))?;
        stack.add_output(Output::new(
            format!("{}-queue-name", entry.key),
            get_att(&logical, "QueueName"),
        ))?;
        stack.add_output(Output::new(
            format!("{}-queue-arn", entry.key),
            get_att(&logical, "Arn"),
        ))?;

        Ok(logical)
    }

    /// Declare a topic from the `topics` collection
    pub fn add_topic(&self, stack: &mut Stack, blueprint: &Blueprint, key: &str) -> Result<String> {
        let entry = resolve(blueprint.topics.as_deref(), "topics", key)?;
        let base_name = self
            .naming
            .resource_name_with(&entry.name, entry.skip_stage_suffix);
        let topic_name = fifo_name(&base_name, entry.fifo);

        let mut defaults = json!({
            "TopicName": topic_name,
            "Tags": self.environment.default_tags(self.naming),
        });
        if entry.fifo {
            defaults["FifoTopic"] = json!(true);
        }
        if let Some(display_name) = &entry.display_name {
            defaults["DisplayName"] = json!(display_name);
        }
        let properties = merge(defaults, Value::Object(entry.extra.clone()));

        let logical = camel_case(&format!("{}-topic", entry.key));
        debug!(key = %entry.key, name = %topic_name, "Declaring topic");
        stack.add_resource(&logical, Resource::new("AWS::SNS::Topic", properties))?;

        // For topics the primary reference is the ARN
        stack.add_output(Output::new(
            format!("{}-topic-arn", entry.key),
            reference(&logical),
        ))?;
        stack.add_output(Output::new(
            format!("{}-topic-name", entry.key),
            get_att(&logical, "TopicName"),
        ))?;

        Ok(logical)
    }
}

/// FIFO resources require the ".fifo" name suffix
fn fifo_name(base: &str, fifo: bool) -> String {
    if fifo {
        format!("{}.fifo", base)
    } else {
        base.to_string()
    }
}
