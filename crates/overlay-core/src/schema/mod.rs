//! Schema query interface
//!
//! The compiler never owns the runtime's resource model; it asks questions
//! about it through [`ResourceSchema`]. [`SchemaTree`] is an in-memory
//! implementation that can be loaded from YAML or JSON.

mod definition;
mod tree;

pub use definition::{AttributeDefinition, AttributeKind, OperationDefinition, StorageKind};
pub use tree::{Registration, SchemaTree};

use crate::address::ResourceAddress;

/// Read-only view of the runtime's resource registrations
///
/// Addresses passed in may be concrete (`/subsystem=logging`) or contain
/// wildcards (`/subsystem=*`). Implementations resolve a concrete segment to
/// an exact registration first and a wildcard registration second.
pub trait ResourceSchema {
    /// Resource type names that may appear directly below `address`.
    fn child_types(&self, address: &ResourceAddress) -> Vec<String>;

    /// Attribute definitions declared on the resource at `address`, in
    /// declaration order.
    fn attributes(&self, address: &ResourceAddress) -> Vec<&AttributeDefinition>;

    fn attribute(&self, address: &ResourceAddress, name: &str) -> Option<&AttributeDefinition>;

    /// The operation `name` as registered for `address`, if any.
    fn operation(&self, address: &ResourceAddress, name: &str) -> Option<&OperationDefinition>;

    /// The registration address backing `address`, or `None` when nothing
    /// is registered there (a placeholder position).
    fn sub_resource(&self, address: &ResourceAddress) -> Option<ResourceAddress>;

    fn attribute_names(&self, address: &ResourceAddress) -> Vec<String> {
        self.attributes(address)
            .into_iter()
            .map(|a| a.name.clone())
            .collect()
    }

    fn has_child_type(&self, address: &ResourceAddress, name: &str) -> bool {
        self.child_types(address).iter().any(|c| c == name)
    }

    fn has_attribute(&self, address: &ResourceAddress, name: &str) -> bool {
        self.attribute(address, name).is_some()
    }
}
