//! Compiler errors.
//!
//! Every variant is fatal: compilation stops and no document is produced.

use thiserror::Error;

/// Result type alias for compiler operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A `@definition` name does not resolve to a model class
    #[error("the model definition for {model} was not found")]
    DefinitionNotFound { model: String },

    /// An operation declares an HTTP method outside the supported set
    #[error("unknown HTTP method specified in {procedure} : {method}")]
    UnsupportedMethod { procedure: String, method: String },

    /// The configured controller is unknown to the class provider
    #[error("controller class {controller} was not found")]
    ControllerNotFound { controller: String },
}

impl Error {
    /// HTTP-equivalent status for callers that surface the failure over HTTP.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::DefinitionNotFound { .. } | Error::UnsupportedMethod { .. } => 501,
            Error::ControllerNotFound { .. } => 500,
        }
    }
}
