//! Error types for overlay-core

use crate::address::ResourceAddress;
use crate::schema::AttributeKind;

/// Result type for overlay-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort compilation
///
/// Unresolvable keys are not errors; they are reported as advisories in the
/// compile report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `!undefine` on a resource that does not exist in the baseline
    #[error("Cannot undefine attribute '{attribute}' of {address}: resource does not exist")]
    UndefineOnMissingResource {
        address: ResourceAddress,
        attribute: String,
    },

    /// The overlay value does not have the shape the schema declares
    #[error("Attribute '{attribute}' of {address} expects {expected} but the overlay has a {found}")]
    TypeMismatch {
        address: ResourceAddress,
        attribute: String,
        expected: AttributeKind,
        found: &'static str,
    },

    /// A directive nested inside an attribute value
    #[error("Directive {directive} is not allowed inside attribute '{attribute}' of {address}")]
    DirectiveNotAllowed {
        address: ResourceAddress,
        attribute: String,
        directive: String,
    },

    /// Malformed CLI-style address
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// A document failed to compile
    #[error("Overlay document {index} failed: {source}")]
    DocumentFailed {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// Input file not found
    #[error("Not found: {0}")]
    NotFound(String),

    // Transparent wrappers for underlying crate errors
    /// Document error from overlay-document
    #[error(transparent)]
    Document(#[from] overlay_document::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
