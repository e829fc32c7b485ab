//! Blueprint synthesis driver
//!
//! Walks every declared collection entry and invokes the corresponding
//! manager. Library callers that only need a few resources can invoke the
//! managers per-key directly instead.

use crate::api::ApiManager;
use crate::certificate::CertificateManager;
use crate::compute::FunctionManager;
use crate::dns::DnsManager;
use crate::environment::Environment;
use crate::error::Result;
use crate::events::EventsManager;
use crate::iam::IamManager;
use crate::messaging::MessagingManager;
use crate::network::NetworkManager;
use crate::secret::SecretManager;
use crate::storage::StorageManager;
use formwork_core::model::Blueprint;
use formwork_core::{Keyed, NamingContext};
use formwork_synth::Stack;
use std::collections::HashSet;
use tracing::{debug, info};

/// Synthesize a stack from a blueprint
///
/// Collections are processed in dependency order (policies and roles
/// before the resources that reference them). Each distinct key is
/// processed once; when duplicate keys exist the first entry wins, the
/// same rule resolution applies.
pub fn synthesize(
    blueprint: &Blueprint,
    naming: &NamingContext,
    environment: &Environment,
) -> Result<Stack> {
    let mut stack = Stack::new(naming.stack_name());
    if let Some(description) = &blueprint.description {
        stack = stack.with_description(description.clone());
    }

    let iam = IamManager::new(naming, environment);
    let storage = StorageManager::new(naming, environment);
    let certificates = CertificateManager::new(naming, environment);
    let functions = FunctionManager::new(naming, environment);
    let apis = ApiManager::new(naming, environment);
    let network = NetworkManager::new(naming, environment);
    let events = EventsManager::new(naming, environment);
    let messaging = MessagingManager::new(naming, environment);
    let dns = DnsManager::new(naming, environment);
    let secrets = SecretManager::new(naming, environment);

    for key in distinct_keys(&blueprint.policies) {
        iam.add_policy(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.roles) {
        iam.add_role(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.vpcs) {
        network.add_vpc(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.buckets) {
        storage.add_bucket(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.tables) {
        storage.add_table(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.certificates) {
        certificates.add_certificate(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.functions) {
        functions.add_function(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.apis) {
        apis.add_http_api(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.domains) {
        apis.add_domain(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.rules) {
        events.add_rule(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.queues) {
        messaging.add_queue(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.topics) {
        messaging.add_topic(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.records) {
        dns.add_record(&mut stack, blueprint, key)?;
    }
    for key in distinct_keys(&blueprint.secrets) {
        secrets.add_secret(&mut stack, blueprint, key)?;
    }

    info!(
        stack = %stack.name(),
        resources = stack.resources().len(),
        outputs = stack.outputs().len(),
        "Synthesis complete"
    );

    Ok(stack)
}

/// Distinct keys of a collection, in declaration order
///
/// Duplicate keys are skipped so resolution (first match wins) and
/// declaration stay consistent.
fn distinct_keys<T: Keyed>(collection: &Option<Vec<T>>) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    if let Some(entries) = collection {
        for entry in entries {
            if seen.insert(entry.key()) {
                keys.push(entry.key());
            } else {
                debug!(key = %entry.key(), "Skipping shadowed duplicate entry");
            }
        }
    }
    keys
}
