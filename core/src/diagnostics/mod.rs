//! Shared building blocks for error reporting.

pub mod context;

pub use context::Context;
