//! Model classes → definition schemas.

use super::types::{Registry, ResolvedType};
use crate::error::{Error, Result};
use crate::introspect::{ClassInfo, FieldInfo, Introspect};
use crate::model::{Schema, Xml};
use serde_json::Value;
use std::collections::BTreeMap;
use swagdoc_syntax::{fields, tokenize, DocComment};

/// Separator between a model namespace and a model name.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// One model field, read from its `@var`, `@enum`, `@format`, `@example`
/// and `@required` tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    /// Raw type token, possibly ending in `[]`
    pub ty: String,
    pub description: String,
    pub format: Option<String>,
    pub example: Option<String>,
    pub required: bool,
    pub enumeration: Option<Vec<String>>,
    /// `Null` when the field has no declared default
    pub default: Value,
}

impl FieldDescriptor {
    pub fn from_field(field: &FieldInfo) -> Self {
        let comment = DocComment::parse(&field.comment);
        let tags = &comment.tags;
        let [ty, description] = fields::<2>(tags.first("var").unwrap_or(""));

        Self {
            name: field.name.clone(),
            ty,
            description,
            format: tags.first("format").map(str::to_string),
            example: tags.first("example").map(str::to_string),
            required: tags.contains("required"),
            // The last @enum wins
            enumeration: tags.values("enum").last().map(|e| tokenize(e, None)),
            default: field.default.clone(),
        }
    }
}

/// Look up the model class behind a definition name.
///
/// Unqualified names are prefixed with `namespace`.
pub fn find_model<'a, P>(provider: &'a P, namespace: &str, name: &str) -> Result<&'a ClassInfo>
where
    P: Introspect + ?Sized,
{
    let qualified = if name.contains(NAMESPACE_SEPARATOR) || namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", namespace, NAMESPACE_SEPARATOR, name)
    };

    provider
        .class(&qualified)
        .filter(|class| class.model)
        .ok_or(Error::DefinitionNotFound { model: qualified })
}

/// Build the object schema of a model.
///
/// `xml` adds the `xml.name` hint carried by referenced models.
pub fn build_model(name: &str, fields: &[FieldDescriptor], registry: &Registry, xml: bool) -> Schema {
    let properties: BTreeMap<String, Schema> = fields
        .iter()
        .map(|field| (field.name.clone(), field_schema(field, registry)))
        .collect();
    let required: Vec<String> = fields
        .iter()
        .filter(|field| field.required)
        .map(|field| field.name.clone())
        .collect();

    Schema {
        ty: Some("object".to_string()),
        required: (!required.is_empty()).then_some(required),
        properties: Some(properties),
        xml: xml.then(|| Xml {
            name: name.to_string(),
            wrapped: None,
        }),
        ..Default::default()
    }
}

fn field_schema(field: &FieldDescriptor, registry: &Registry) -> Schema {
    let mut schema = match registry.resolve(&field.ty) {
        // A bare reference carries no siblings
        ResolvedType::Reference(model) => return Schema::reference(&model),
        ResolvedType::Array(inner) => match *inner {
            ResolvedType::Reference(model) => Schema {
                xml: Some(Xml {
                    name: singular(&field.name).to_string(),
                    wrapped: Some(true),
                }),
                ..Schema::array(Schema::reference(&model))
            },
            other => Schema::array(other.schema()),
        },
        other => Schema {
            enumeration: field.enumeration.clone(),
            ..other.schema()
        },
    };

    if field.format.is_some() {
        schema.format = field.format.clone();
    }
    schema.example = field.example.clone();
    if !field.description.is_empty() {
        schema.description = Some(field.description.clone());
    }
    if !field.default.is_null() {
        schema.default = Some(field.default.clone());
    }
    schema
}

fn singular(name: &str) -> &str {
    name.strip_suffix('s').unwrap_or(name)
}
