//! Shared test utilities for the overlay workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`schema`]: a small management schema covering every compiler branch
//! - [`workspace`]: [`TestWorkspace`] for writing overlays, schemas and
//!   baselines to a temporary directory

pub mod schema;
pub mod workspace;

pub use schema::{SAMPLE_SCHEMA_YAML, sample_schema};
pub use workspace::TestWorkspace;
