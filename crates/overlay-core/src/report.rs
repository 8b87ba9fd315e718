//! Advisories raised while compiling
//!
//! An advisory records an overlay key that was skipped. Compilation carries
//! on; the report lets callers show operators what was ignored and why.

use serde::Serialize;
use std::fmt;

use crate::address::ResourceAddress;

/// Why an overlay key produced no operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AdvisoryKind {
    /// No registration matches the address
    UnresolvedAddress,
    /// A resource position holds a value that is not a mapping
    NotActionable { value: String },
    /// The resource type is registered but has no `add` operation
    NotCreatable,
    /// A required operation is not registered at the address
    MissingOperation { operation: String },
    /// The attribute can only be read on the resource
    ResourceOnlyAttribute,
    /// The attribute is runtime storage
    RuntimeAttribute,
    /// Attribute writes need a concrete resource, not a wildcard
    WildcardTarget,
    /// An extension entry without a usable `module`
    MalformedExtension,
}

impl fmt::Display for AdvisoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedAddress => f.write_str("no resource registration found"),
            Self::NotActionable { value } => write!(f, "value {value} is not actionable here"),
            Self::NotCreatable => f.write_str("resource type has no add operation, not created"),
            Self::MissingOperation { operation } => {
                write!(f, "operation '{operation}' is not registered")
            }
            Self::ResourceOnlyAttribute => f.write_str("attribute is resource-only"),
            Self::RuntimeAttribute => f.write_str("attribute is runtime storage"),
            Self::WildcardTarget => f.write_str("address is a wildcard"),
            Self::MalformedExtension => f.write_str("extension has no module"),
        }
    }
}

/// One skipped overlay key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    pub address: ResourceAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(flatten)]
    pub kind: AdvisoryKind,
}

impl Advisory {
    pub fn new(address: ResourceAddress, key: Option<&str>, kind: AdvisoryKind) -> Self {
        Self {
            address,
            key: key.map(str::to_string),
            kind,
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{} [{}]: {}", self.address, key, self.kind),
            None => write!(f, "{}: {}", self.address, self.kind),
        }
    }
}

/// A document that failed when compilation was allowed to continue
#[derive(Debug)]
pub struct DocumentFailure {
    /// Position of the document in the overlay set
    pub index: usize,
    pub error: crate::error::Error,
}

/// Everything compilation reported besides the operations
#[derive(Debug, Default)]
pub struct CompileReport {
    pub advisories: Vec<Advisory>,
    pub failures: Vec<DocumentFailure>,
}

impl CompileReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_clean(&self) -> bool {
        self.advisories.is_empty() && self.failures.is_empty()
    }

    /// Advisories recorded for one address.
    pub fn for_address(&self, address: &ResourceAddress) -> Vec<&Advisory> {
        self.advisories
            .iter()
            .filter(|a| &a.address == address)
            .collect()
    }
}
