//! Annotation-to-schema compiler.
//!
//! Pipeline for one controller:
//!
//! ```text
//! controller comment ──► registry (ApiResponse + @definition names)
//!                    ──► definitions   (definition::build_model)
//!                    ──► info, tags, host, basePath, schemes, externalDocs
//! procedures         ──► paths         (operation::build_operation)
//! ```
//!
//! A run either returns a whole [`Document`] or the first fatal [`Error`].

pub mod definition;
pub mod location;
pub mod operation;
pub mod types;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::introspect::{FieldInfo, Introspect};
use crate::model::{Contact, Document, ExternalDocs, Info, License, Schema, Tag};
use definition::{build_model, find_model, FieldDescriptor};
use operation::{build_operation, OperationContext};
use std::collections::{BTreeMap, HashMap};
use swagdoc_syntax::{fields, DocComment, TagMap};
use tracing::{debug, trace};
use types::{Registry, API_RESPONSE};

/// Compile the configured controller into a Swagger document.
pub fn compile<P>(provider: &P, config: &Config) -> Result<Document>
where
    P: Introspect + ?Sized,
{
    let controller = provider
        .class(&config.controller)
        .ok_or_else(|| Error::ControllerNotFound {
            controller: config.controller.clone(),
        })?;
    let comment = DocComment::parse(&controller.comment);
    let tags = &comment.tags;

    let definition_names = tags.values("definition");
    let mut registry = Registry::new();
    for name in &definition_names {
        registry.register(*name);
    }

    let mut definitions = BTreeMap::new();
    definitions.insert(
        API_RESPONSE.to_string(),
        build_model(API_RESPONSE, &api_response_fields(), &registry, false),
    );
    for name in definition_names {
        definitions.insert(
            name.to_string(),
            compile_definition(provider, config, &registry, name)?,
        );
    }

    let produces: Vec<String> = tags.values("produces").into_iter().map(str::to_string).collect();
    let ctx = OperationContext {
        registry: &registry,
        config,
        produces: &produces,
    };

    let mut paths: BTreeMap<String, BTreeMap<String, _>> = BTreeMap::new();
    for procedure in &controller.procedures {
        if procedure.declaring_class != controller.name {
            trace!(procedure = %procedure.name, "skipping inherited procedure");
            continue;
        }
        let procedure_comment = DocComment::parse(&procedure.comment);
        if !procedure_comment.tags.contains("path") {
            trace!(procedure = %procedure.name, "skipping undocumented procedure");
            continue;
        }
        let endpoint = build_operation(procedure, &procedure_comment, &ctx)?;
        paths
            .entry(endpoint.path)
            .or_default()
            .insert(endpoint.method, endpoint.operation);
    }

    Ok(Document {
        swagger: config.swagger_version.clone(),
        info: build_info(&comment),
        host: tags.first("host").unwrap_or(config.host.as_str()).to_string(),
        base_path: tags.first("basePath").unwrap_or(config.base_path.as_str()).to_string(),
        tags: build_tags(tags),
        schemes: tags.values("scheme").into_iter().map(str::to_string).collect(),
        paths,
        security_definitions: config.security_definitions.clone(),
        definitions,
        external_docs: tags.first("externalDocs").map(|value| {
            let [url, description] = fields::<2>(value);
            ExternalDocs { description, url }
        }),
    })
}

fn compile_definition<P>(provider: &P, config: &Config, registry: &Registry, name: &str) -> Result<Schema>
where
    P: Introspect + ?Sized,
{
    let class = find_model(provider, &config.models_namespace, name)?;
    let fields: Vec<FieldDescriptor> = class.fields.iter().map(FieldDescriptor::from_field).collect();
    debug!(model = name, fields = fields.len(), "compiled definition");
    Ok(build_model(name, &fields, registry, true))
}

/// Fields of the built-in response envelope.
fn api_response_fields() -> Vec<FieldDescriptor> {
    [("code", "@var int32"), ("type", "@var string"), ("message", "@var string")]
        .into_iter()
        .map(|(name, comment)| {
            FieldDescriptor::from_field(&FieldInfo {
                name: name.to_string(),
                comment: comment.to_string(),
                ..Default::default()
            })
        })
        .collect()
}

fn build_info(comment: &DocComment) -> Info {
    let tags = &comment.tags;
    Info {
        title: comment.summary.clone(),
        description: comment.detail.clone(),
        version: tags.first("version").map(str::to_string),
        terms_of_service: tags.first("termsOfService").map(str::to_string),
        contact: tags.first("email").map(|email| Contact {
            email: email.to_string(),
        }),
        license: tags.first("license").map(|value| {
            let [url, name] = fields::<2>(value);
            License { name, url }
        }),
    }
}

/// `@tag name description`, with `@tagExternalDocs tag url description`
/// attached to the matching entry.
fn build_tags(tags: &TagMap) -> Vec<Tag> {
    let mut external_docs: HashMap<String, ExternalDocs> = HashMap::new();
    for value in tags.values("tagExternalDocs") {
        let [tag, url, description] = fields::<3>(value);
        external_docs.insert(tag, ExternalDocs { description, url });
    }

    tags.values("tag")
        .into_iter()
        .map(|value| {
            let [name, description] = fields::<2>(value);
            let external_docs = external_docs.get(&name).cloned();
            Tag {
                name,
                description,
                external_docs,
            }
        })
        .collect()
}
