//! Deployment environment defaults
//!
//! Environment-derived defaults (account, region, common tags) are merged
//! into every constructed resource, with entry-level configuration taking
//! precedence.

use crate::error::Result;
use formwork_core::NamingContext;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// Deployment environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Environment {
    /// Account id
    #[serde(default)]
    pub account: Option<String>,

    /// Region (e.g., "ap-northeast-1")
    #[serde(default)]
    pub region: Option<String>,

    /// Tags applied to every taggable resource
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Environment {
    /// Build from process environment variables
    ///
    /// Reads FORM_ACCOUNT and FORM_REGION, falling back to AWS_REGION.
    pub fn from_env() -> Self {
        Self {
            account: std::env::var("FORM_ACCOUNT").ok(),
            region: std::env::var("FORM_REGION")
                .or_else(|_| std::env::var("AWS_REGION"))
                .ok(),
            tags: BTreeMap::new(),
        }
    }

    /// Load defaults, merging the global config file with env vars
    ///
    /// The global file (`~/.config/formwork/environment.json`) supplies
    /// base values; process environment variables win over it.
    pub fn load() -> Result<Self> {
        let mut environment = match global_config_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "Loading global environment defaults");
                let content = std::fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        let from_env = Self::from_env();
        if from_env.account.is_some() {
            environment.account = from_env.account;
        }
        if from_env.region.is_some() {
            environment.region = from_env.region;
        }

        Ok(environment)
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Default tag list for a resource, including stack and stage tags
    ///
    /// Rendered in the Key/Value list form used by template documents.
    /// Tag order is deterministic.
    pub fn default_tags(&self, naming: &NamingContext) -> serde_json::Value {
        let mut tags = self.tags.clone();
        tags.insert("formwork:stack".to_string(), naming.stack_name().to_string());
        tags.insert("formwork:stage".to_string(), naming.stage().to_string());

        let list: Vec<serde_json::Value> = tags
            .into_iter()
            .map(|(key, value)| json!({"Key": key, "Value": value}))
            .collect();
        json!(list)
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("formwork").join("environment.json"))
}
