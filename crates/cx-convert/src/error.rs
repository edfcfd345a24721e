//! Error types for conversion operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing project files.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML in a source document
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute in a source document
    #[error("attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Required `ProjectGuid` element is absent
    #[error("missing <ProjectGuid> in {}", .path.display())]
    MissingProjectGuid { path: PathBuf },

    /// Guid text that does not parse as a 128-bit identifier
    #[error("invalid guid '{value}': {source}")]
    InvalidGuid {
        value: String,
        #[source]
        source: uuid::Error,
    },

    /// Required attribute absent from an element
    #[error("element <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// `TargetFrameworkVersion` is needed to derive the framework moniker
    #[error("missing TargetFrameworkVersion, cannot derive a framework moniker")]
    MissingTargetFramework,
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
