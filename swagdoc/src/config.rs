//! Compiler configuration (`swagdoc.toml`).

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Everything the surrounding application hands to the compiler.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Prefix for unqualified `@definition` names, e.g. `app::models`
    pub models_namespace: String,

    /// Value of the top-level `swagger` key
    pub swagger_version: String,

    /// HTTP methods an operation's `@method` may name
    pub supported_methods: Vec<String>,

    /// Copied verbatim into `securityDefinitions`
    pub security_definitions: BTreeMap<String, Value>,

    /// Class whose procedures are compiled
    pub controller: String,

    /// Runtime default for `host` when the controller has no `@host`
    pub host: String,

    /// Runtime default for `basePath` when the controller has no `@basePath`
    pub base_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models_namespace: String::new(),
            swagger_version: "2.0".to_string(),
            supported_methods: ["get", "post", "put", "delete", "patch", "head", "options"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            security_definitions: BTreeMap::new(),
            controller: String::new(),
            host: "localhost".to_string(),
            base_path: "/".to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        content
            .parse()
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    pub fn supports_method(&self, method: &str) -> bool {
        self.supported_methods.iter().any(|m| m == method)
    }
}

impl std::str::FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        toml::from_str(content)
    }
}
