//! Attribute and operation definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::operation::HandlerId;

/// Shape of an attribute value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    #[default]
    Scalar,
    Object,
    List,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::List => "LIST",
        })
    }
}

/// Where an attribute's value lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Persisted configuration, settable through operations
    #[default]
    Configuration,
    /// Computed at runtime, never targeted by the compiler
    Runtime,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Definition of an attribute or operation parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AttributeDefinition {
    pub name: String,

    #[serde(default)]
    pub kind: AttributeKind,

    /// Fields of an OBJECT attribute, in schema order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AttributeDefinition>,

    /// Element definition of a LIST attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<AttributeDefinition>>,

    /// Only readable on the resource, never set through an operation
    #[serde(default, skip_serializing_if = "is_false")]
    pub resource_only: bool,

    #[serde(default)]
    pub storage: StorageKind,
}

impl AttributeDefinition {
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Scalar,
            children: Vec::new(),
            element: None,
            resource_only: false,
            storage: StorageKind::Configuration,
        }
    }

    pub fn object(name: impl Into<String>, children: Vec<AttributeDefinition>) -> Self {
        Self {
            kind: AttributeKind::Object,
            children,
            ..Self::scalar(name)
        }
    }

    pub fn list(name: impl Into<String>, element: AttributeDefinition) -> Self {
        Self {
            kind: AttributeKind::List,
            element: Some(Box::new(element)),
            ..Self::scalar(name)
        }
    }

    /// Mark the attribute as resource-only.
    pub fn resource_only(mut self) -> Self {
        self.resource_only = true;
        self
    }

    /// Mark the attribute as runtime storage.
    pub fn runtime(mut self) -> Self {
        self.storage = StorageKind::Runtime;
        self
    }

    /// True when an operation may carry this attribute.
    pub fn is_settable(&self) -> bool {
        !self.resource_only && self.storage == StorageKind::Configuration
    }

    /// Element definition of a list, defaulting to a scalar element.
    pub fn element_definition(&self) -> AttributeDefinition {
        self.element
            .as_deref()
            .cloned()
            .unwrap_or_else(|| AttributeDefinition::scalar(self.name.clone()))
    }
}

/// Definition of an operation registered on a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDefinition {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<AttributeDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<HandlerId>,
}

impl OperationDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            handler: None,
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<AttributeDefinition>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(HandlerId::new(handler));
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&AttributeDefinition> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
