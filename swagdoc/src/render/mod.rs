//! Output renderers, selected by format name.

pub mod json;

use crate::model::Document;
use anyhow::{anyhow, Result};

/// Serializes a compiled [`Document`] in one output format.
pub trait Renderer {
    fn render(&self, doc: &Document) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Renderer for a `--format` value.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "json" => Ok(Box::new(json::JsonRenderer { pretty: true })),
        "json-compact" => Ok(Box::new(json::JsonRenderer { pretty: false })),
        _ => Err(anyhow!(
            "unknown format: {}. Use json or json-compact",
            format
        )),
    }
}
