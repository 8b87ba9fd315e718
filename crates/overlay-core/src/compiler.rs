//! Attribute value compiler
//!
//! Turns an overlay value into an operation parameter value, driven by the
//! attribute definition. This is the only place that dispatches on
//! [`AttributeKind`].
//!
//! - SCALAR: the value's text.
//! - OBJECT: declared fields present in the overlay, in schema order.
//!   Unknown overlay keys are dropped; missing fields are omitted.
//! - LIST: one entry per sequence element. An element may carry a reserved
//!   `index` key, which becomes a position hint for `list-add`.

use overlay_document::{DocumentValue, Mapping};

use crate::address::ResourceAddress;
use crate::error::{Error, Result};
use crate::operation::INDEX;
use crate::schema::{AttributeDefinition, AttributeKind};
use crate::value::{ModelObject, ModelValue};

/// A compiled list element with its optional insert position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListElement {
    pub value: ModelValue,
    pub index: Option<String>,
}

/// Compiles overlay values for attributes of one resource
#[derive(Debug, Clone, Copy)]
pub struct ValueCompiler<'a> {
    address: &'a ResourceAddress,
}

impl<'a> ValueCompiler<'a> {
    /// `address` is only used to describe failures.
    pub fn new(address: &'a ResourceAddress) -> Self {
        Self { address }
    }

    /// Compile `raw` according to `definition`.
    ///
    /// An explicit null compiles to [`ModelValue::Undefined`] for every kind.
    pub fn compile(&self, definition: &AttributeDefinition, raw: &DocumentValue) -> Result<ModelValue> {
        if let DocumentValue::Directive(directive) = raw {
            return Err(Error::DirectiveNotAllowed {
                address: self.address.clone(),
                attribute: definition.name.clone(),
                directive: directive.to_string(),
            });
        }
        if raw.is_null() {
            return Ok(ModelValue::Undefined);
        }
        match definition.kind {
            AttributeKind::Scalar => Ok(ModelValue::String(raw.to_string())),
            AttributeKind::Object => {
                let map = self.expect_mapping(definition, raw)?;
                self.compile_object(definition, map).map(ModelValue::Object)
            }
            AttributeKind::List => {
                let values = self
                    .compile_list(definition, raw)?
                    .into_iter()
                    .map(|element| element.value)
                    .collect();
                Ok(ModelValue::List(values))
            }
        }
    }

    /// Compile the fields of an OBJECT attribute.
    pub fn compile_object(&self, definition: &AttributeDefinition, map: &Mapping) -> Result<ModelObject> {
        let mut object = ModelObject::new();
        for child in &definition.children {
            if let Some(value) = map.get(&child.name) {
                object.insert(child.name.clone(), self.compile(child, value)?);
            }
        }
        for key in map.keys() {
            if !definition.children.iter().any(|c| c.name == key) && key != INDEX {
                tracing::debug!(
                    address = %self.address,
                    attribute = %definition.name,
                    key,
                    "Dropping key not declared by the schema"
                );
            }
        }
        Ok(object)
    }

    /// Compile each element of a LIST attribute, keeping position hints.
    pub fn compile_list(
        &self,
        definition: &AttributeDefinition,
        raw: &DocumentValue,
    ) -> Result<Vec<ListElement>> {
        let items = raw.as_sequence().ok_or_else(|| self.mismatch(definition, raw))?;
        let element_definition = definition.element_definition();
        items
            .iter()
            .map(|item| self.compile_element(&element_definition, item))
            .collect()
    }

    fn compile_element(
        &self,
        element: &AttributeDefinition,
        item: &DocumentValue,
    ) -> Result<ListElement> {
        if let DocumentValue::Directive(directive) = item {
            return Err(Error::DirectiveNotAllowed {
                address: self.address.clone(),
                attribute: element.name.clone(),
                directive: directive.to_string(),
            });
        }
        match (element.kind, item) {
            (AttributeKind::Object, DocumentValue::Mapping(map)) => {
                let index = map.get(INDEX).map(|i| i.to_string());
                let value = self.compile_object(element, map)?;
                Ok(ListElement {
                    value: ModelValue::Object(value),
                    index,
                })
            }
            (AttributeKind::Scalar, DocumentValue::Mapping(map))
                if map.contains_key(INDEX) && map.len() > 1 =>
            {
                Ok(self.indexed_scalar(element, map))
            }
            _ => Ok(ListElement {
                value: ModelValue::String(item.to_string()),
                index: None,
            }),
        }
    }

    /// `{index: N, <key>: value}` for a scalar element. When several keys
    /// sit beside `index` the last one wins.
    fn indexed_scalar(&self, element: &AttributeDefinition, map: &Mapping) -> ListElement {
        let index = map.get(INDEX).map(|i| i.to_string());
        let payloads: Vec<_> = map.iter().filter(|(k, _)| *k != INDEX).collect();
        if payloads.len() > 1 {
            tracing::warn!(
                address = %self.address,
                attribute = %element.name,
                keys = ?payloads.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
                "Indexed list element has several values, keeping the last"
            );
        }
        let value = payloads
            .last()
            .map(|(_, v)| ModelValue::String(v.to_string()))
            .unwrap_or(ModelValue::Undefined);
        ListElement { value, index }
    }

    fn expect_mapping<'v>(
        &self,
        definition: &AttributeDefinition,
        raw: &'v DocumentValue,
    ) -> Result<&'v Mapping> {
        raw.as_mapping().ok_or_else(|| self.mismatch(definition, raw))
    }

    fn mismatch(&self, definition: &AttributeDefinition, raw: &DocumentValue) -> Error {
        Error::TypeMismatch {
            address: self.address.clone(),
            attribute: definition.name.clone(),
            expected: definition.kind,
            found: raw.kind_name(),
        }
    }
}
