//! Public API for the Reckon expression evaluator.
//!
//! This module provides the stable public API for compiling and executing
//! Reckon expressions:
//!
//! 1. Build an [`Engine`], registering functions in its initialization closure.
//! 2. [`Engine::compile`] parses source into a [`CompiledExpression`].
//! 3. [`CompiledExpression::run`] evaluates it.
//!
//! All failures are reported as [`Error`], carrying [`Diagnostic`]s with
//! source spans where available.
//!
//! # Example
//!
//! ```
//! use reckon_core::api::{Engine, EngineOptions, Error};
//! use reckon_core::values::{DynamicFunction, FunctionError, Value};
//!
//! let engine = Engine::with_stdlib(EngineOptions::default(), |registry| {
//!     registry.register(
//!         "double",
//!         DynamicFunction::single(1, |args| match args[0] {
//!             Value::Int(v) => Ok(Value::Int(v * 2)),
//!             Value::Float(v) => Ok(Value::Float(v * 2.0)),
//!             Value::Bool(_) => Err(FunctionError::type_mismatch("expected a number")),
//!         }),
//!     )
//! })
//! .unwrap();
//!
//! assert_eq!(engine.eval("double(int(21))").unwrap(), Value::Int(42));
//! assert!(matches!(engine.eval("1 +"), Err(Error::Compilation { .. })));
//! assert!(matches!(engine.eval("log(2)"), Err(Error::Runtime { .. })));
//! ```

pub mod engine;
pub mod error;
pub mod expression;
pub mod options;


pub use engine::Engine;
pub use error::{Diagnostic, Error, RelatedInfo, Severity};
pub use expression::CompiledExpression;
pub use options::{EngineOptions, ExecutionOptions};
