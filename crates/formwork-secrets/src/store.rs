//! Secrets store access
//!
//! Wraps the AWS CLI for reading secret values. Loading is strictly
//! sequential: no concurrency, no batching, no retry. A failure aborts
//! the caller, which is developer tooling that can simply be re-run.
//!
//! Resolved secret values are never logged.

use crate::error::{Result, SecretsError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::process::Stdio;
use tokio::process::Command;

/// A resolved secret value
#[derive(Debug, Clone, PartialEq)]
pub enum SecretValue {
    /// A plain string secret
    Plain(String),
    /// A JSON object secret, flattened to key/value pairs
    Map(BTreeMap<String, String>),
}

/// Read-only secrets store
#[async_trait]
pub trait SecretsStore: Send + Sync {
    /// Load a single secret by name
    async fn load_secret(&self, name: &str) -> Result<SecretValue>;

    /// Load several secrets, one at a time, in the given order
    ///
    /// Failures are collected so one bad name reports alongside the rest,
    /// but any failure fails the whole call.
    async fn load_secrets(&self, names: &[String]) -> Result<Vec<(String, SecretValue)>> {
        let mut results = Vec::new();
        let mut errors = Vec::new();

        for name in names {
            match self.load_secret(name).await {
                Ok(value) => results.push((name.clone(), value)),
                Err(e) => errors.push(format!("{}: {}", name, e)),
            }
        }

        if !errors.is_empty() {
            return Err(SecretsError::PartialFailure(errors.join("\n")));
        }

        tracing::info!(count = results.len(), "Loaded all secrets");
        Ok(results)
    }
}

/// AWS CLI response for get-secret-value
#[derive(Debug, Deserialize)]
struct GetSecretValueResponse {
    #[serde(rename = "SecretString")]
    secret_string: Option<String>,
}

/// Secrets store backed by the AWS CLI
pub struct CliSecretsStore {
    profile: Option<String>,
    region: Option<String>,
}

impl CliSecretsStore {
    pub fn new(profile: Option<String>, region: Option<String>) -> Self {
        Self { profile, region }
    }

    /// Check that the AWS CLI is installed
    pub async fn check_cli(&self) -> Result<()> {
        let which = Command::new("which").arg("aws").output().await?;
        if !which.status.success() {
            return Err(SecretsError::CliNotFound);
        }
        Ok(())
    }

    /// Run an AWS CLI command and return stdout
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("aws");
        if let Some(profile) = &self.profile {
            cmd.arg("--profile").arg(profile);
        }
        if let Some(region) = &self.region {
            cmd.arg("--region").arg(region);
        }
        cmd.args(args);
        cmd.arg("--output").arg("json");
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: aws {}", args.join(" "));

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            // Map common failures onto actionable hints
            let hint = if stderr.contains("ExpiredToken") || stderr.contains("expired") {
                "\nhint: refresh your credentials (aws sso login)"
            } else if stderr.contains("could not be found") || stderr.contains("Unable to locate") {
                "\nhint: check the profile name and your AWS config"
            } else {
                ""
            };

            return Err(SecretsError::CommandFailed(format!(
                "{}{}",
                stderr.trim(),
                hint
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl SecretsStore for CliSecretsStore {
    async fn load_secret(&self, name: &str) -> Result<SecretValue> {
        tracing::debug!(secret = %name, "Loading secret");

        let output = self
            .run_command(&["secretsmanager", "get-secret-value", "--secret-id", name])
            .await?;

        let response: GetSecretValueResponse = serde_json::from_str(&output)?;
        let secret_string = response
            .secret_string
            .ok_or_else(|| SecretsError::NotFound(name.to_string()))?;

        Ok(parse_secret_string(secret_string))
    }
}

/// JSON-object secrets flatten into a map; anything else stays plain
fn parse_secret_string(secret_string: String) -> SecretValue {
    match serde_json::from_str::<BTreeMap<String, String>>(&secret_string) {
        Ok(map) => SecretValue::Map(map),
        Err(_) => SecretValue::Plain(secret_string),
    }
}
