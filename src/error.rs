//! @ai:module:intent Define error types for the apiDoc validator
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for operational and programmer failures
/// @ai:context Malformed documents never surface here, they become diagnostics
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported dialect `{0}`, expected one of c-style, triple-quote, hash-block, begin-end")]
    UnsupportedDialect(String),

    #[error("Cannot detect dialect for {0}")]
    UndetectedDialect(PathBuf),

    #[error("Invalid rule set: {0}")]
    InvalidRuleSet(String),

    #[error("Invalid directive pattern for `{key}`: {source}")]
    InvalidPattern {
        key: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to store source text: {0}")]
    Store(String),

    #[error("Failed to generate documentation: {0}")]
    Generate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
