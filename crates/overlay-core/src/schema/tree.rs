//! In-memory schema tree
//!
//! Registrations form a tree keyed first by resource type and then by
//! instance name, where the name `*` registers every instance of the type.
//!
//! ```yaml
//! global-operations:
//!   - name: write-attribute
//! children:
//!   subsystem:
//!     logging:
//!       attributes:
//!         - name: level
//!       operations:
//!         - name: add
//!           parameters:
//!             - name: level
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::definition::{AttributeDefinition, OperationDefinition};
use super::ResourceSchema;
use crate::address::{PathElement, ResourceAddress, WILDCARD};
use crate::error::{Error, Result};

/// One registered resource type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeDefinition>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<OperationDefinition>,

    /// type -> instance name (or `*`) -> registration
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, BTreeMap<String, Registration>>,
}

impl Registration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, definition: AttributeDefinition) -> Self {
        self.attributes.push(definition);
        self
    }

    pub fn operation(mut self, definition: OperationDefinition) -> Self {
        self.operations.push(definition);
        self
    }

    /// Register an `add` operation whose parameters are every settable
    /// attribute declared so far.
    pub fn addable(self) -> Self {
        let parameters = self
            .attributes
            .iter()
            .filter(|a| a.is_settable())
            .cloned()
            .collect();
        self.operation(OperationDefinition::new(crate::operation::ADD).with_parameters(parameters))
    }

    /// Register a child resource. Use `*` as `name` for a wildcard type.
    pub fn child(
        mut self,
        key: impl Into<String>,
        name: impl Into<String>,
        registration: Registration,
    ) -> Self {
        self.children
            .entry(key.into())
            .or_default()
            .insert(name.into(), registration);
        self
    }

    fn find_operation(&self, name: &str) -> Option<&OperationDefinition> {
        self.operations.iter().find(|op| op.name == name)
    }

    fn find_attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Resolve one segment: exact name first, then the wildcard.
    ///
    /// A wildcard segment only matches a wildcard registration.
    fn resolve_child(&self, element: &PathElement) -> Option<(&str, &Registration)> {
        let by_name = self.children.get(&element.key)?;
        if !element.is_wildcard() {
            if let Some((name, reg)) = by_name.get_key_value(&element.value) {
                return Some((name.as_str(), reg));
            }
        }
        by_name
            .get_key_value(WILDCARD)
            .map(|(name, reg)| (name.as_str(), reg))
    }
}

/// A complete registration tree with inherited global operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaTree {
    /// Operations available on every registered resource unless the
    /// registration declares its own
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub global_operations: Vec<OperationDefinition>,

    #[serde(flatten)]
    pub root: Registration,
}

impl SchemaTree {
    pub fn new(root: Registration) -> Self {
        Self {
            global_operations: Vec::new(),
            root,
        }
    }

    pub fn with_global_operation(mut self, definition: OperationDefinition) -> Self {
        self.global_operations.push(definition);
        self
    }

    /// Parse a schema from YAML.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load a schema file. `.json` files are read as JSON, anything else as
    /// YAML.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        tracing::debug!(?path, "Loading schema");
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Find the registration backing `address` and its registration path.
    pub fn resolve(&self, address: &ResourceAddress) -> Option<(&Registration, ResourceAddress)> {
        let mut current = &self.root;
        let mut path = Vec::with_capacity(address.len());
        for element in address.iter() {
            let (name, next) = current.resolve_child(element)?;
            path.push(PathElement::new(element.key.clone(), name));
            current = next;
        }
        Some((current, ResourceAddress::new(path)))
    }

    fn registration(&self, address: &ResourceAddress) -> Option<&Registration> {
        self.resolve(address).map(|(reg, _)| reg)
    }
}

impl ResourceSchema for SchemaTree {
    fn child_types(&self, address: &ResourceAddress) -> Vec<String> {
        self.registration(address)
            .map(|reg| reg.children.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn attributes(&self, address: &ResourceAddress) -> Vec<&AttributeDefinition> {
        self.registration(address)
            .map(|reg| reg.attributes.iter().collect())
            .unwrap_or_default()
    }

    fn attribute(&self, address: &ResourceAddress, name: &str) -> Option<&AttributeDefinition> {
        self.registration(address)?.find_attribute(name)
    }

    fn operation(&self, address: &ResourceAddress, name: &str) -> Option<&OperationDefinition> {
        let reg = self.registration(address)?;
        reg.find_operation(name)
            .or_else(|| self.global_operations.iter().find(|op| op.name == name))
    }

    fn sub_resource(&self, address: &ResourceAddress) -> Option<ResourceAddress> {
        self.resolve(address).map(|(_, path)| path)
    }
}
