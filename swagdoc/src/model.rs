//! Swagger 2.0 document model: what the compiler emits.
//!
//! Field order follows the emitted key order; optional members are left out
//! of the JSON entirely when unset.

use serde::ser::{Error as _, SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Root document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub swagger: String,
    pub info: Info,
    pub host: String,
    pub base_path: String,
    pub tags: Vec<Tag>,
    pub schemes: Vec<String>,
    /// path → HTTP method → operation
    pub paths: BTreeMap<String, BTreeMap<String, Operation>>,
    pub security_definitions: BTreeMap<String, Value>,
    pub definitions: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Controller summary line
    pub title: String,
    /// Controller detail text
    pub description: String,
    /// @version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// @termsOfService
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    /// @email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// @license
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct License {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternalDocs {
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,
}

/// One (path, method) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub summary: String,
    pub description: String,
    pub operation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,
    pub parameters: Vec<Parameter>,
    /// Keyed by status code or `default`
    pub responses: BTreeMap<String, Response>,
    /// One single-entry map per security definition name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<BTreeMap<String, Vec<String>>>>,
}

/// Transport location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    FormData,
    Body,
}

/// A request parameter.
///
/// Serialized as one flat object: `name`, `in`, then the `@constraint`
/// pairs in annotation order, then the typed members. A constraint whose key
/// matches a member keeps its position but takes the member's value when that
/// member is set, so every key is written once.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    /// @constraint key/value pairs for this parameter
    pub constraints: Vec<(String, String)>,
    pub description: Option<String>,
    pub required: bool,
    pub ty: Option<String>,
    pub format: Option<String>,
    pub items: Option<Box<Schema>>,
    pub collection_format: Option<String>,
    pub schema: Option<Schema>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, location: ParameterLocation, required: bool) -> Self {
        Self {
            name: name.into(),
            location,
            constraints: Vec::new(),
            description: None,
            required,
            ty: None,
            format: None,
            items: None,
            collection_format: None,
            schema: None,
        }
    }

    /// Record a constraint; a repeated key replaces the earlier value in place.
    pub fn constrain(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.constraints.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.constraints.push((key, value)),
        }
    }

    /// Members in output order, later writes replacing earlier ones.
    fn entries(&self) -> serde_json::Result<Vec<(String, Value)>> {
        let mut entries: Vec<(String, Value)> = Vec::new();
        let mut set = |key: &str, value: Value| {
            match entries.iter_mut().find(|(k, _)| k == key) {
                Some((_, existing)) => *existing = value,
                None => entries.push((key.to_string(), value)),
            }
        };

        set("name", Value::String(self.name.clone()));
        set("in", serde_json::to_value(self.location)?);
        for (key, value) in &self.constraints {
            set(key, Value::String(value.clone()));
        }
        if let Some(description) = &self.description {
            set("description", Value::String(description.clone()));
        }
        set("required", Value::Bool(self.required));
        if let Some(ty) = &self.ty {
            set("type", Value::String(ty.clone()));
        }
        if let Some(format) = &self.format {
            set("format", Value::String(format.clone()));
        }
        if let Some(items) = &self.items {
            set("items", serde_json::to_value(items)?);
        }
        if let Some(collection_format) = &self.collection_format {
            set("collectionFormat", Value::String(collection_format.clone()));
        }
        if let Some(schema) = &self.schema {
            set("schema", serde_json::to_value(schema)?);
        }
        Ok(entries)
    }
}

impl Serialize for Parameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries().map_err(S::Error::custom)?;
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in &entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, Header>>,
}

impl Response {
    /// A response carrying only a description.
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

/// @emitsHeader entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub description: String,
}

/// JSON-Schema node: model definitions, fields, items, response bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<Xml>,
}

impl Schema {
    /// `{"$ref": "#/definitions/<model>"}` and nothing else.
    pub fn reference(model: &str) -> Self {
        Self {
            reference: Some(definition_path(model)),
            ..Default::default()
        }
    }

    pub fn typed(ty: impl Into<String>, format: Option<String>) -> Self {
        Self {
            ty: Some(ty.into()),
            format,
            ..Default::default()
        }
    }

    pub fn array(items: Schema) -> Self {
        Self {
            ty: Some("array".to_string()),
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Xml {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapped: Option<bool>,
}

/// Location of a model definition inside the document.
pub fn definition_path(model: &str) -> String {
    format!("#/definitions/{}", model)
}
