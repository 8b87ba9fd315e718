//! Extension declarations
//!
//! The reserved `extension` key of an overlay root declares extensions to load
//! before any resource is configured:
//!
//! ```yaml
//! configuration:
//!   extension:
//!     org.example.metrics:
//!       module: org.example.metrics
//! ```
//!
//! Each declared extension missing from the baseline becomes an `add` at
//! `/extension=<name>` with a `module` parameter.

use overlay_document::{DocumentValue, Mapping};

use crate::address::ResourceAddress;
use crate::baseline::BaselineIndex;
use crate::config::EXTENSION_KEY;
use crate::operation::{ADD, Operation};
use crate::report::{Advisory, AdvisoryKind};
use crate::schema::ResourceSchema;

/// Parameter naming the module that provides an extension
pub const MODULE: &str = "module";

/// Compiles the `extension` section of an overlay root
pub struct ExtensionProcessor<'a> {
    schema: &'a dyn ResourceSchema,
    baseline: &'a BaselineIndex,
}

impl<'a> ExtensionProcessor<'a> {
    pub fn new(schema: &'a dyn ResourceSchema, baseline: &'a BaselineIndex) -> Self {
        Self { schema, baseline }
    }

    /// Compile the extension declarations found in `root`, if any.
    pub fn process(&self, root: &Mapping) -> (Vec<Operation>, Vec<Advisory>) {
        let mut operations = Vec::new();
        let mut advisories = Vec::new();

        let extensions = match root.get(EXTENSION_KEY) {
            None | Some(DocumentValue::Null) => return (operations, advisories),
            Some(DocumentValue::Mapping(extensions)) => extensions,
            Some(other) => {
                let advisory = Advisory::new(
                    ResourceAddress::root(),
                    Some(EXTENSION_KEY),
                    AdvisoryKind::NotActionable {
                        value: other.to_string(),
                    },
                );
                tracing::warn!(%advisory, "Extension section is not a mapping");
                advisories.push(advisory);
                return (operations, advisories);
            }
        };

        for (name, body) in extensions.iter() {
            let address = ResourceAddress::root().append(EXTENSION_KEY, name);
            if self.baseline.exists(&address) {
                tracing::debug!(%address, "Extension already declared");
                continue;
            }
            let Some(module) = body
                .as_mapping()
                .and_then(|m| m.get(MODULE))
                .filter(|m| !m.is_null())
            else {
                let advisory = Advisory::new(address, Some(name), AdvisoryKind::MalformedExtension);
                tracing::warn!(%advisory, "Skipping extension");
                advisories.push(advisory);
                continue;
            };
            let Some(definition) = self.schema.operation(&address, ADD) else {
                let advisory = Advisory::new(
                    address,
                    Some(name),
                    AdvisoryKind::MissingOperation {
                        operation: ADD.to_string(),
                    },
                );
                tracing::warn!(%advisory, "Skipping extension");
                advisories.push(advisory);
                continue;
            };
            tracing::debug!(%address, %module, "Adding extension");
            operations.push(
                Operation::new(address, ADD)
                    .with_param(MODULE, module.to_string())
                    .with_handler(definition.handler.clone()),
            );
        }
        (operations, advisories)
    }
}
