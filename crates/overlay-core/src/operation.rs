//! Management operations
//!
//! The same record describes baseline operations read from the primary
//! configuration and operations compiled from an overlay. A composite
//! operation carries its children in `steps`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::ResourceAddress;
use crate::value::{ModelObject, ModelValue};

pub const ADD: &str = "add";
pub const REMOVE: &str = "remove";
pub const WRITE_ATTRIBUTE: &str = "write-attribute";
pub const UNDEFINE_ATTRIBUTE: &str = "undefine-attribute";
pub const LIST_ADD: &str = "list-add";
pub const COMPOSITE: &str = "composite";

pub const NAME: &str = "name";
pub const VALUE: &str = "value";
pub const INDEX: &str = "index";

/// Opaque reference to the runtime handler that executes an operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerId(pub String);

impl HandlerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HandlerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single mutation of the resource tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub address: ResourceAddress,

    #[serde(rename = "operation")]
    pub name: String,

    #[serde(default, skip_serializing_if = "ModelObject::is_empty")]
    pub params: ModelObject,

    /// Child operations of a composite
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<HandlerId>,
}

impl Operation {
    pub fn new(address: ResourceAddress, name: impl Into<String>) -> Self {
        Self {
            address,
            name: name.into(),
            params: ModelObject::new(),
            steps: Vec::new(),
            handler: None,
        }
    }

    /// A composite wrapping `steps`, addressed at the root.
    pub fn composite(steps: Vec<Operation>) -> Self {
        Self {
            steps,
            ..Self::new(ResourceAddress::root(), COMPOSITE)
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ModelValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    pub fn with_params(mut self, params: ModelObject) -> Self {
        self.params = params;
        self
    }

    pub fn with_handler(mut self, handler: Option<HandlerId>) -> Self {
        self.handler = handler;
        self
    }

    pub fn param(&self, name: &str) -> Option<&ModelValue> {
        self.params.get(name)
    }

    pub fn is_composite(&self) -> bool {
        !self.steps.is_empty()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_composite() {
            write!(f, "{}:{}[", self.address, self.name)?;
            for (i, step) in self.steps.iter().enumerate() {
                if i > 0 {
                    f.write_str("; ")?;
                }
                step.fmt(f)?;
            }
            return f.write_str("]");
        }
        write!(f, "{}:{}", self.address, self.name)?;
        if !self.params.is_empty() {
            write!(f, "({})", self.params)?;
        }
        Ok(())
    }
}
