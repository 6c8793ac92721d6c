//! swagdoc: compile Swagger 2.0 documents from `@tag` annotated classes.
//!
//! A controller class contributes one operation per documented procedure;
//! model classes contribute reusable definitions. Class metadata comes from an
//! [`introspect::Introspect`] provider, comment blocks are read with
//! [`swagdoc_syntax`], and [`compile::compile`] assembles the [`model::Document`].

pub mod compile;
pub mod config;
pub mod error;
pub mod introspect;
pub mod model;
pub mod render;

pub use compile::compile;
pub use config::Config;
pub use error::{Error, Result};
