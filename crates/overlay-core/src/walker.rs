//! Resource tree walker
//!
//! Walks an overlay mapping against the schema and the baseline index and
//! emits the operations that bring the resource tree into the described
//! state. Each key is classified as one of:
//!
//! - a child resource type of the current address, or any key while walking
//!   a placeholder grouping,
//! - a directive (`!remove` / `!undefine`),
//! - an existing sibling resource to update,
//! - an attribute of the current resource,
//! - a new resource to create.
//!
//! Keys the schema cannot place are skipped and recorded as advisories.
//! The only hard failure is `!undefine` against a resource that does not
//! exist; structural mismatches raised by the value compiler also abort.

use overlay_document::{Directive, DocumentValue, Mapping};

use crate::address::ResourceAddress;
use crate::baseline::BaselineIndex;
use crate::compiler::ValueCompiler;
use crate::error::{Error, Result};
use crate::operation::{
    ADD, INDEX, LIST_ADD, NAME, Operation, REMOVE, UNDEFINE_ATTRIBUTE, VALUE, WRITE_ATTRIBUTE,
};
use crate::report::{Advisory, AdvisoryKind};
use crate::schema::{AttributeDefinition, AttributeKind, OperationDefinition, ResourceSchema, StorageKind};
use crate::value::ModelObject;

/// Compiles overlay mappings into operations
///
/// One walker holds the operations and advisories of one compilation.
/// Operations are kept in emission order.
pub struct Walker<'a> {
    schema: &'a dyn ResourceSchema,
    baseline: &'a BaselineIndex,
    operations: Vec<Operation>,
    advisories: Vec<Advisory>,
}

impl<'a> Walker<'a> {
    pub fn new(schema: &'a dyn ResourceSchema, baseline: &'a BaselineIndex) -> Self {
        Self {
            schema,
            baseline,
            operations: Vec::new(),
            advisories: Vec::new(),
        }
    }

    /// Walk an overlay root, starting at the root address.
    pub fn compile(&mut self, root: &Mapping) -> Result<()> {
        self.walk(root, &ResourceAddress::root(), false)
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }

    /// Consume the walker, returning emitted operations and advisories.
    pub fn finish(self) -> (Vec<Operation>, Vec<Advisory>) {
        (self.operations, self.advisories)
    }

    fn walk(&mut self, mapping: &Mapping, address: &ResourceAddress, placeholder: bool) -> Result<()> {
        let schema = self.schema;
        for (key, value) in mapping.iter() {
            if placeholder || schema.has_child_type(address, key) {
                self.child_resource(address, key, value, placeholder)?;
            } else {
                self.resource_key(address, key, value)?;
            }
        }
        Ok(())
    }

    /// `key` names a resource type below `address`, or the next name while
    /// walking a placeholder.
    ///
    /// A `!undefine` here targets the child resource itself and names the
    /// attribute after `key`, so `subsystem: {logging: !undefine}` emits
    /// `undefine-attribute(name=logging)` on `/subsystem=logging`.
    fn child_resource(
        &mut self,
        address: &ResourceAddress,
        key: &str,
        value: &DocumentValue,
        placeholder: bool,
    ) -> Result<()> {
        let child = if placeholder {
            // The grouping key is the resource type, `key` is the instance.
            match address.sibling(key) {
                Some(child) => child,
                None => {
                    self.advise(address.clone(), Some(key), AdvisoryKind::UnresolvedAddress);
                    return Ok(());
                }
            }
        } else {
            address.append_wildcard(key)
        };

        match value {
            DocumentValue::Mapping(map) => match self.schema.sub_resource(&child) {
                Some(_) if child.is_wildcard() => self.walk(map, &child, false),
                Some(_) => self.enter_resource(&child, map),
                None => {
                    tracing::info!(address = %child, key, "No registration, walking as placeholder");
                    self.walk(map, &child, true)
                }
            },
            DocumentValue::Directive(directive) => match directive {
                Directive::Remove => self.remove(&child, key),
                Directive::Undefine => self.undefine(&child, key),
            },
            DocumentValue::Null if !self.baseline.exists(&child) => self.add_empty(&child, key),
            other => {
                self.advise(
                    child,
                    Some(key),
                    AdvisoryKind::NotActionable {
                        value: other.to_string(),
                    },
                );
                Ok(())
            }
        }
    }

    /// `key` is not a child type of `address`: a directive, an existing
    /// sibling, an attribute or a resource to create, checked in that order.
    fn resource_key(&mut self, address: &ResourceAddress, key: &str, value: &DocumentValue) -> Result<()> {
        let schema = self.schema;
        let baseline = self.baseline;

        if let Some(directive) = value.as_directive() {
            return match directive {
                // Under a wildcard type the key names the instance.
                Directive::Undefine if address.is_wildcard() => match address.sibling(key) {
                    Some(target) => self.undefine(&target, key),
                    None => self.undefine(address, key),
                },
                Directive::Undefine => self.undefine(address, key),
                Directive::Remove => match address.sibling(key) {
                    Some(target) => self.remove(&target, key),
                    None => {
                        tracing::debug!(%address, key, "Nothing to remove at the root");
                        Ok(())
                    }
                },
            };
        }

        let sibling = address.sibling(key);
        if let Some(target) = sibling.as_ref().filter(|t| baseline.exists(t)) {
            return match value {
                DocumentValue::Mapping(map) => {
                    tracing::debug!(address = %target, "Resource exists, updating");
                    self.walk(map, target, false)
                }
                other => {
                    self.advise(
                        target.clone(),
                        Some(key),
                        AdvisoryKind::NotActionable {
                            value: other.to_string(),
                        },
                    );
                    Ok(())
                }
            };
        }

        if let Some(definition) = schema.attribute(address, key) {
            return self.write_attribute(address, definition, value);
        }

        let target = match sibling {
            Some(target) if schema.sub_resource(&target).is_some() => target,
            Some(target) => {
                self.advise(target, Some(key), AdvisoryKind::UnresolvedAddress);
                return Ok(());
            }
            None => {
                self.advise(address.clone(), Some(key), AdvisoryKind::UnresolvedAddress);
                return Ok(());
            }
        };
        match value {
            DocumentValue::Mapping(map) => self.enter_resource(&target, map),
            DocumentValue::Null => self.add_empty(&target, key),
            other => {
                self.advise(
                    target,
                    Some(key),
                    AdvisoryKind::NotActionable {
                        value: other.to_string(),
                    },
                );
                Ok(())
            }
        }
    }

    /// Step into a concrete registered resource. A resource missing from the
    /// baseline is created first with every settable attribute the overlay
    /// gives; the rest of the mapping is then walked at the resource.
    fn enter_resource(&mut self, address: &ResourceAddress, mapping: &Mapping) -> Result<()> {
        if self.baseline.exists(address) {
            tracing::debug!(%address, "Resource exists, updating");
            return self.walk(mapping, address, false);
        }
        let schema = self.schema;
        match schema.operation(address, ADD) {
            Some(definition) => {
                let remaining = self.emit_add(address, definition, mapping)?;
                self.walk(&remaining, address, false)
            }
            None => {
                self.advise(address.clone(), None, AdvisoryKind::NotCreatable);
                self.walk(mapping, address, false)
            }
        }
    }

    /// Emit the `add` for `address` and return the keys it did not consume.
    ///
    /// ADD parameters are bound first, then any other settable attribute of
    /// the resource, each in schema order. Lists are compiled wholesale.
    fn emit_add(
        &mut self,
        address: &ResourceAddress,
        definition: &'a OperationDefinition,
        mapping: &Mapping,
    ) -> Result<Mapping> {
        let schema = self.schema;
        let compiler = ValueCompiler::new(address);
        let mut params = ModelObject::new();
        let mut consumed: Vec<&str> = Vec::new();

        let candidates = definition.parameters.iter().chain(schema.attributes(address));
        for attribute in candidates {
            let name = attribute.name.as_str();
            if consumed.contains(&name) || !settable(schema, address, attribute) {
                continue;
            }
            let Some(value) = mapping.get(name) else {
                continue;
            };
            if value.as_directive().is_some() {
                continue;
            }
            consumed.push(name);
            if value.is_null() {
                continue;
            }
            params.insert(name, compiler.compile(attribute, value)?);
        }

        self.emit(
            Operation::new(address.clone(), ADD)
                .with_params(params)
                .with_handler(definition.handler.clone()),
        );
        Ok(mapping.without(&consumed))
    }

    /// `key: ~` naming a resource with no body.
    fn add_empty(&mut self, address: &ResourceAddress, key: &str) -> Result<()> {
        if address.is_wildcard() {
            self.advise(address.clone(), Some(key), AdvisoryKind::WildcardTarget);
            return Ok(());
        }
        let schema = self.schema;
        if schema.sub_resource(address).is_none() {
            self.advise(address.clone(), Some(key), AdvisoryKind::UnresolvedAddress);
            return Ok(());
        }
        match schema.operation(address, ADD) {
            Some(definition) => {
                self.emit(Operation::new(address.clone(), ADD).with_handler(definition.handler.clone()));
            }
            None => self.advise(address.clone(), Some(key), AdvisoryKind::NotCreatable),
        }
        Ok(())
    }

    fn write_attribute(
        &mut self,
        address: &ResourceAddress,
        definition: &AttributeDefinition,
        value: &DocumentValue,
    ) -> Result<()> {
        let key = definition.name.as_str();
        if address.is_wildcard() {
            self.advise(address.clone(), Some(key), AdvisoryKind::WildcardTarget);
            return Ok(());
        }
        if definition.resource_only {
            self.advise(address.clone(), Some(key), AdvisoryKind::ResourceOnlyAttribute);
            return Ok(());
        }
        if definition.storage == StorageKind::Runtime {
            self.advise(address.clone(), Some(key), AdvisoryKind::RuntimeAttribute);
            return Ok(());
        }

        let compiler = ValueCompiler::new(address);
        if definition.kind == AttributeKind::List && value.as_sequence().is_some() {
            // Existing lists grow element by element.
            let Some(operation) = self.require_operation(address, key, LIST_ADD) else {
                return Ok(());
            };
            for element in compiler.compile_list(definition, value)? {
                let mut list_add = Operation::new(address.clone(), LIST_ADD)
                    .with_param(NAME, key)
                    .with_param(VALUE, element.value);
                if let Some(index) = element.index {
                    list_add = list_add.with_param(INDEX, index);
                }
                self.emit(list_add.with_handler(operation.handler.clone()));
            }
            return Ok(());
        }

        let Some(operation) = self.require_operation(address, key, WRITE_ATTRIBUTE) else {
            return Ok(());
        };
        let compiled = compiler.compile(definition, value)?;
        self.emit(
            Operation::new(address.clone(), WRITE_ATTRIBUTE)
                .with_param(NAME, key)
                .with_param(VALUE, compiled)
                .with_handler(operation.handler.clone()),
        );
        Ok(())
    }

    fn remove(&mut self, address: &ResourceAddress, key: &str) -> Result<()> {
        if !self.baseline.exists(address) {
            tracing::debug!(%address, "Resource does not exist, nothing to remove");
            return Ok(());
        }
        if let Some(operation) = self.require_operation(address, key, REMOVE) {
            self.emit(Operation::new(address.clone(), REMOVE).with_handler(operation.handler.clone()));
        }
        Ok(())
    }

    fn undefine(&mut self, address: &ResourceAddress, key: &str) -> Result<()> {
        if !self.baseline.exists(address) {
            return Err(Error::UndefineOnMissingResource {
                address: address.clone(),
                attribute: key.to_string(),
            });
        }
        if let Some(operation) = self.require_operation(address, key, UNDEFINE_ATTRIBUTE) {
            self.emit(
                Operation::new(address.clone(), UNDEFINE_ATTRIBUTE)
                    .with_param(NAME, key)
                    .with_handler(operation.handler.clone()),
            );
        }
        Ok(())
    }

    /// Look up `name` at `address`, recording an advisory when it is missing.
    fn require_operation(
        &mut self,
        address: &ResourceAddress,
        key: &str,
        name: &str,
    ) -> Option<&'a OperationDefinition> {
        let schema = self.schema;
        let operation = schema.operation(address, name);
        if operation.is_none() {
            self.advise(
                address.clone(),
                Some(key),
                AdvisoryKind::MissingOperation {
                    operation: name.to_string(),
                },
            );
        }
        operation
    }

    fn emit(&mut self, operation: Operation) {
        tracing::debug!(%operation, "Emitting operation");
        self.operations.push(operation);
    }

    fn advise(&mut self, address: ResourceAddress, key: Option<&str>, kind: AdvisoryKind) {
        let advisory = Advisory::new(address, key, kind);
        tracing::warn!(
            address = %advisory.address,
            key = ?advisory.key,
            "Skipping overlay key: {}",
            advisory.kind
        );
        self.advisories.push(advisory);
    }
}

/// An ADD parameter is only bound when the resource's own attribute of the
/// same name is settable too.
fn settable(schema: &dyn ResourceSchema, address: &ResourceAddress, attribute: &AttributeDefinition) -> bool {
    attribute.is_settable()
        && schema
            .attribute(address, &attribute.name)
            .is_none_or(AttributeDefinition::is_settable)
}
