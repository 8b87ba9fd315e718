//! Overlay document model and parsing
//!
//! Overlay files are parsed into a small closed value type, [`DocumentValue`],
//! that the compiler walks against the runtime schema. Two custom YAML tags
//! are turned into directive sentinels instead of ordinary scalars:
//!
//! ```yaml
//! configuration:
//!   subsystem:
//!     logging:
//!       level: !undefine
//!     mail: !remove
//! ```
//!
//! The tag-to-value mapping is pluggable through [`TagRegistry`].

pub mod error;
pub mod loader;
pub mod tags;
pub mod value;
pub mod yaml;

pub use error::{Error, Result};
pub use loader::{OverlayDocument, OverlaySet};
pub use tags::{TagConstructor, TagRegistry};
pub use value::{Directive, DocumentValue, Mapping, Scalar};
pub use yaml::YamlParser;
