//! Type tokens → schema types.
//!
//! A token is, in order of precedence: an array (`Pet[]`, one level only),
//! a reference to a registered model, a `Map(<inner>)` primitive, or a plain
//! primitive with an optional format (`int32` → `integer`/`int32`).

use crate::model::Schema;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Trailing marker turning a type token into an array of that type.
pub const ARRAY_MARKER: &str = "[]";

/// Built-in response envelope, always registered.
pub const API_RESPONSE: &str = "ApiResponse";

static RE_MAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Map\((.*)\)$").unwrap());

/// `{type, format}` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primitive {
    pub ty: String,
    pub format: Option<String>,
}

impl Primitive {
    pub fn schema(&self) -> Schema {
        Schema::typed(self.ty.clone(), self.format.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Primitive(Primitive),
    /// Object whose `additionalProperties` are the inner primitive
    Map(Primitive),
    /// Registered model name
    Reference(String),
    /// Never wraps another array
    Array(Box<ResolvedType>),
}

impl ResolvedType {
    /// Schema node for this type, references included.
    pub fn schema(&self) -> Schema {
        match self {
            ResolvedType::Primitive(primitive) => primitive.schema(),
            ResolvedType::Map(inner) => Schema {
                ty: Some("object".to_string()),
                additional_properties: Some(Box::new(inner.schema())),
                ..Default::default()
            },
            ResolvedType::Reference(model) => Schema::reference(model),
            ResolvedType::Array(inner) => Schema::array(inner.schema()),
        }
    }
}

/// Known model names for one compilation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    models: BTreeSet<String>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry holding only the built-in response envelope.
    pub fn new() -> Self {
        Self {
            models: BTreeSet::from([API_RESPONSE.to_string()]),
        }
    }

    pub fn register(&mut self, model: impl Into<String>) {
        self.models.insert(model.into());
    }

    pub fn is_defined(&self, token: &str) -> bool {
        self.models.contains(token)
    }

    pub fn resolve(&self, token: &str) -> ResolvedType {
        match token.strip_suffix(ARRAY_MARKER) {
            Some(inner) => ResolvedType::Array(Box::new(self.resolve_element(inner))),
            None => self.resolve_element(token),
        }
    }

    fn resolve_element(&self, token: &str) -> ResolvedType {
        if self.is_defined(token) {
            return ResolvedType::Reference(token.to_string());
        }
        if let Some(caps) = RE_MAP.captures(token) {
            return ResolvedType::Map(type_and_format(&caps[1]));
        }
        ResolvedType::Primitive(type_and_format(token))
    }
}

/// Format table lookup; unknown tokens pass through as the type.
pub fn type_and_format(token: &str) -> Primitive {
    let (ty, format) = match token {
        "int32" | "int64" => ("integer", Some(token)),
        "date-time" => ("string", Some(token)),
        other => (other, None),
    };
    Primitive {
        ty: ty.to_string(),
        format: format.map(str::to_string),
    }
}
