//! Command implementations for overlay-cli

pub mod compile;
pub mod inspect;

pub use compile::run_compile;
pub use inspect::run_inspect;
