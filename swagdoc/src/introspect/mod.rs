//! Class metadata provider: the compiler's only view of the application.
//!
//! The compiler asks for classes by identifier and reads their raw comment
//! text, procedures and fields. [`ClassManifest`] is the shipped provider;
//! anything with its own type metadata can implement [`Introspect`] instead.

pub mod manifest;

pub use manifest::ClassManifest;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Source of class metadata.
pub trait Introspect {
    fn class(&self, id: &str) -> Option<&ClassInfo>;
}

/// A controller or model class.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassInfo {
    /// Fully qualified identifier, e.g. `app::models::Pet`
    pub name: String,
    #[serde(default)]
    pub comment: String,
    /// Recognized model class
    #[serde(default)]
    pub model: bool,
    #[serde(default, rename = "procedure", alias = "procedures")]
    pub procedures: Vec<ProcedureInfo>,
    #[serde(default, rename = "field", alias = "fields")]
    pub fields: Vec<FieldInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcedureInfo {
    pub name: String,
    /// Class that declares the procedure; defaults to the owning class
    #[serde(default)]
    pub declaring_class: String,
    /// Formal parameter names, in signature order
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub comment: String,
}

impl ProcedureInfo {
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldInfo {
    pub name: String,
    #[serde(default)]
    pub comment: String,
    /// Declared default value; `null` when there is none
    #[serde(default)]
    pub default: Value,
}

/// Parse a manifest file based on its extension.
pub fn parse_manifest(path: &Path, content: &str) -> Result<ClassManifest> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => ClassManifest::from_toml(content),
        Some("json") => ClassManifest::from_json(content),
        _ => Err(anyhow!("unsupported manifest type: {}", path.display())),
    }
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<ClassManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_manifest(path, &content).with_context(|| format!("in manifest {}", path.display()))
}
