//! swagdoc annotation syntax.
//!
//! Shared by the swagdoc compiler and anything else that needs to read
//! `@tag` annotated comment blocks:
//!
//! - [`DocComment`]: summary, detail and [`TagMap`] of one comment block
//! - [`tokenize`] / [`fields`]: whitespace splitting of a single tag value

mod comment;
mod tags;
mod tokenize;

pub use comment::DocComment;
pub use tags::{TagMap, TagValue};
pub use tokenize::{fields, tokenize};
