//! Schema-directed overlay compiler
//!
//! Reconciles overlay documents against a runtime's resource schema and
//! produces the management operations that apply them on top of an existing
//! baseline operation sequence.
//!
//! ```text
//! overlay documents ─┐
//! baseline ops ──────┼─> Reconciler ─> Walker ─> OperationScript
//! ResourceSchema ────┘                  │
//!                                       └─> ValueCompiler
//! ```

pub mod address;
pub mod baseline;
pub mod compiler;
pub mod config;
pub mod error;
pub mod extensions;
pub mod operation;
pub mod reconcile;
pub mod report;
pub mod schema;
pub mod script;
pub mod value;
pub mod walker;

pub use address::{PathElement, ResourceAddress, WILDCARD};
pub use baseline::{BaselineEntry, BaselineIndex, load_baseline};
pub use compiler::{ListElement, ValueCompiler};
pub use config::OverlayConfig;
pub use error::{Error, Result};
pub use extensions::ExtensionProcessor;
pub use operation::{HandlerId, Operation};
pub use reconcile::{Reconciler, Reconciliation};
pub use report::{Advisory, AdvisoryKind, CompileReport, DocumentFailure};
pub use schema::{
    AttributeDefinition, AttributeKind, OperationDefinition, Registration, ResourceSchema,
    SchemaTree, StorageKind,
};
pub use script::OperationScript;
pub use value::{ModelObject, ModelValue};
pub use walker::Walker;
