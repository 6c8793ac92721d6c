//! Annotated procedures → Swagger operations.

use super::location::classify_location;
use super::types::{type_and_format, Registry, ResolvedType};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::introspect::ProcedureInfo;
use crate::model::{Header, Operation, Parameter, Response, Schema};
use regex::Regex;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;
use swagdoc_syntax::{fields, tokenize, DocComment, TagMap};
use tracing::{debug, trace};

/// Length of the action prefix stripped from handler names (`actionGetPet`).
pub const HANDLER_PREFIX_LEN: usize = 6;

/// Marker written in front of parameter names in annotations.
pub const SIGIL: char = '$';

static RE_ERROR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\s+(.*)$").unwrap());

/// Controller-wide inputs shared by every operation.
pub struct OperationContext<'a> {
    pub registry: &'a Registry,
    pub config: &'a Config,
    /// Class-level `@produces`, used when an operation has none
    pub produces: &'a [String],
}

/// An operation together with where it is mounted.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub path: String,
    pub method: String,
    pub operation: Operation,
}

/// Compile one procedure that carries a `@path` tag.
pub fn build_operation(
    procedure: &ProcedureInfo,
    comment: &DocComment,
    ctx: &OperationContext<'_>,
) -> Result<Endpoint> {
    let tags = &comment.tags;
    let path = tags.first("path").unwrap_or("").to_string();
    let method = tags.first("method").unwrap_or("").to_string();

    if !ctx.config.supports_method(&method) {
        return Err(Error::UnsupportedMethod {
            procedure: procedure.name.clone(),
            method,
        });
    }

    let enums = parameter_enums(tags);

    let produces = if tags.contains("produces") {
        Some(to_strings(tags.values("produces")))
    } else if !ctx.produces.is_empty() {
        Some(ctx.produces.to_vec())
    } else {
        None
    };

    let operation = Operation {
        tags: tags.contains("tag").then(|| to_strings(tags.values("tag"))),
        summary: comment.summary.clone(),
        description: comment.detail.clone(),
        operation_id: operation_id(&procedure.name),
        consumes: tags
            .contains("consumes")
            .then(|| to_strings(tags.values("consumes"))),
        produces,
        parameters: build_parameters(procedure, tags, &path, &method, &enums, ctx.registry),
        responses: build_responses(tags, ctx.registry),
        security: tags.contains("security").then(|| build_security(tags)),
    };

    debug!(
        procedure = %procedure.name,
        %path,
        %method,
        parameters = operation.parameters.len(),
        "compiled operation"
    );

    Ok(Endpoint {
        path,
        method,
        operation,
    })
}

/// Handler name minus its action prefix, first letter lower-cased:
/// `actionGetPetById` → `getPetById`.
pub fn operation_id(procedure: &str) -> String {
    let mut rest = procedure.chars().skip(HANDLER_PREFIX_LEN);
    match rest.next() {
        Some(first) => first.to_lowercase().chain(rest).collect(),
        None => String::new(),
    }
}

fn strip_sigil(name: &str) -> &str {
    name.trim_start_matches(SIGIL)
}

fn to_strings(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}

/// `@enum $name a b c` → name → literals.
fn parameter_enums(tags: &TagMap) -> HashMap<String, Vec<String>> {
    let mut enums = HashMap::new();
    for value in tags.values("enum") {
        let mut literals = tokenize(value, None);
        if literals.is_empty() {
            continue;
        }
        let name = literals.remove(0).replace(SIGIL, "");
        enums.insert(name, literals);
    }
    enums
}

/// `@constraint key $name value` → name → (key, value) in annotation order.
fn parameter_constraints(tags: &TagMap) -> HashMap<String, Vec<(String, String)>> {
    let mut constraints: HashMap<String, Vec<(String, String)>> = HashMap::new();
    for value in tags.values("constraint") {
        let [key, name, value] = fields::<3>(value);
        constraints
            .entry(strip_sigil(&name).to_string())
            .or_default()
            .push((key, value));
    }
    constraints
}

fn build_parameters(
    procedure: &ProcedureInfo,
    tags: &TagMap,
    path: &str,
    method: &str,
    enums: &HashMap<String, Vec<String>>,
    registry: &Registry,
) -> Vec<Parameter> {
    let constraints = parameter_constraints(tags);
    let consumes = tags.first("consumes").unwrap_or("");
    let mut parameters = Vec::new();

    for (tag, required) in [("parameter", true), ("optparameter", false)] {
        for value in tags.values(tag) {
            let [ty, name, description] = fields::<3>(value);
            let name = strip_sigil(&name).to_string();
            let location =
                classify_location(&name, method, consumes, path, procedure.has_parameter(&name));

            let mut parameter = Parameter::new(name, location, required);
            for (key, value) in constraints.get(&parameter.name).into_iter().flatten() {
                parameter.constrain(key.as_str(), value.as_str());
            }
            if !description.is_empty() {
                parameter.description = Some(description);
            }

            match registry.resolve(&ty) {
                ResolvedType::Array(inner) => match *inner {
                    ResolvedType::Reference(model) => {
                        parameter.schema = Some(Schema::array(Schema::reference(&model)));
                    }
                    other => {
                        let mut items = other.schema();
                        if let Some(literals) = enums.get(&parameter.name) {
                            items.default = Some(Value::String(
                                literals.first().cloned().unwrap_or_default(),
                            ));
                            items.enumeration = Some(literals.clone());
                        }
                        parameter.ty = Some("array".to_string());
                        parameter.items = Some(Box::new(items));
                        parameter.collection_format = Some("csv".to_string());
                    }
                },
                ResolvedType::Primitive(primitive) => {
                    parameter.ty = Some(primitive.ty);
                    parameter.format = primitive.format;
                }
                other => parameter.schema = Some(other.schema()),
            }

            parameters.push(parameter);
        }
    }

    parameters
}

fn build_responses(tags: &TagMap, registry: &Registry) -> BTreeMap<String, Response> {
    let mut responses = BTreeMap::new();

    if let Some(description) = tags.first("default") {
        responses.insert("default".to_string(), Response::described(description));
    }

    if let Some(value) = tags.first("return") {
        let [ty, description] = fields::<2>(value);
        let headers = tags.contains("emitsHeader").then(|| {
            tags.values("emitsHeader")
                .into_iter()
                .map(|header| {
                    let [ty, name, description] = fields::<3>(header);
                    let primitive = type_and_format(&ty);
                    let header = Header {
                        ty: primitive.ty,
                        format: primitive.format,
                        description,
                    };
                    (name, header)
                })
                .collect::<BTreeMap<_, _>>()
        });
        let response = Response {
            description: (!description.is_empty()).then_some(description),
            schema: Some(registry.resolve(&ty).schema()),
            headers,
        };
        responses.insert("200".to_string(), response);
    }

    for entry in tags.values("errors") {
        match RE_ERROR.captures(entry) {
            Some(caps) => {
                responses.insert(caps[1].to_string(), Response::described(&caps[2]));
            }
            None => trace!(entry, "ignoring malformed @errors entry"),
        }
    }

    responses
}

/// `@security bag [permission]` grouped by bag, in first-seen order.
fn build_security(tags: &TagMap) -> Vec<BTreeMap<String, Vec<String>>> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for value in tags.values("security") {
        let [bag, permission] = fields::<2>(value);
        let index = match grouped.iter().position(|(name, _)| *name == bag) {
            Some(index) => index,
            None => {
                grouped.push((bag, Vec::new()));
                grouped.len() - 1
            }
        };
        if !permission.is_empty() {
            grouped[index].1.push(permission);
        }
    }

    grouped
        .into_iter()
        .map(|(bag, permissions)| BTreeMap::from([(bag, permissions)]))
        .collect()
}
