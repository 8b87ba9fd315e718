//! Baseline index
//!
//! The baseline is the operation sequence already produced from the primary
//! configuration. The index answers one question for the compiler: is there
//! a resource at this address, and which operations declared it. Composite
//! operations are flattened first so that a batched `add` is
//! indistinguishable from an individually listed one.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::address::ResourceAddress;
use crate::error::{Error, Result};
use crate::operation::{Operation, REMOVE};

/// Baseline operations declared at one address
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaselineEntry {
    operations: Vec<Operation>,
}

impl BaselineEntry {
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// True when any declared operation has the given name.
    pub fn declares(&self, name: &str) -> bool {
        self.operations.iter().any(|op| op.name == name)
    }
}

/// Address lookup over a baseline operation sequence
#[derive(Debug, Clone, Default)]
pub struct BaselineIndex {
    entries: HashMap<ResourceAddress, BaselineEntry>,
}

impl BaselineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a baseline sequence.
    pub fn build(operations: &[Operation]) -> Self {
        let mut index = Self::new();
        index.record_all(operations);
        index
    }

    /// Add operations to the index, flattening composites.
    pub fn record_all(&mut self, operations: &[Operation]) {
        for operation in operations {
            self.record(operation);
        }
    }

    /// Add one operation. A composite contributes its steps, not itself.
    pub fn record(&mut self, operation: &Operation) {
        if operation.is_composite() {
            self.record_all(&operation.steps);
            return;
        }
        self.entries
            .entry(operation.address.clone())
            .or_default()
            .operations
            .push(operation.clone());
    }

    /// Fold operations emitted on top of the indexed baseline. Unlike
    /// [`record_all`](Self::record_all), a `remove` drops its address and
    /// everything below it.
    pub fn apply_all(&mut self, operations: &[Operation]) {
        for operation in operations {
            if operation.is_composite() {
                self.apply_all(&operation.steps);
            } else if operation.name == REMOVE {
                self.forget(&operation.address);
            } else {
                self.record(operation);
            }
        }
    }

    /// Drop `address` and its descendants from the index.
    pub fn forget(&mut self, address: &ResourceAddress) {
        self.entries.retain(|indexed, _| !indexed.starts_with(address));
    }

    pub fn exists(&self, address: &ResourceAddress) -> bool {
        self.entries.contains_key(address)
    }

    pub fn entry(&self, address: &ResourceAddress) -> Option<&BaselineEntry> {
        self.entries.get(address)
    }

    /// Indexed addresses (sorted).
    pub fn addresses(&self) -> Vec<&ResourceAddress> {
        let mut addresses: Vec<_> = self.entries.keys().collect();
        addresses.sort();
        addresses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read a baseline operation sequence from a JSON file.
pub fn load_baseline(path: &Path) -> Result<Vec<Operation>> {
    if !path.is_file() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    tracing::debug!(?path, "Loading baseline operations");
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
