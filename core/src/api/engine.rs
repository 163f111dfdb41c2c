//! The Reckon evaluation engine.

use std::sync::Arc;

use tracing::debug;

use super::{CompiledExpression, EngineOptions, Error, ExecutionOptions};
use crate::parser;
use crate::registry::{FunctionRegistry, RegistrationError};
use crate::stdlib;
use crate::values::Value;

/// The Reckon compilation and execution engine.
///
/// The engine owns:
/// - The function registry, frozen after initialization
/// - Runtime configuration (EngineOptions)
///
/// An engine is `Send + Sync`. Compiled expressions share its registry, so
/// any number of threads can compile and run expressions through one engine.
///
/// # Example
///
/// ```
/// use reckon_core::api::{Engine, EngineOptions, ExecutionOptions};
/// use reckon_core::values::{NativeFunction, Value};
///
/// let engine = Engine::new(EngineOptions::default(), |registry| {
///     registry.register("sin", NativeFunction::unary(f64::sin))?;
///     registry.register("cos", NativeFunction::unary(f64::cos))
/// })
/// .unwrap();
///
/// // Compile an expression
/// let expr = engine.compile("cos(0) + sin(0) * 2").unwrap();
///
/// // Execute
/// let result = expr.run(ExecutionOptions::default()).unwrap();
/// assert_eq!(result, Value::Float(1.0));
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<FunctionRegistry>,
    options: EngineOptions,
}

impl Engine {
    /// Create a new engine, filling its registry with the initialization
    /// closure. Registration errors abort construction.
    pub fn new(
        options: EngineOptions,
        init: impl FnOnce(&mut FunctionRegistry) -> Result<(), RegistrationError>,
    ) -> Result<Self, Error> {
        let mut registry = FunctionRegistry::new();
        init(&mut registry)?;
        debug!(functions = registry.len(), "engine initialized");

        Ok(Self {
            registry: Arc::new(registry),
            options,
        })
    }

    /// Create an engine with the standard library registered before `init`
    /// runs.
    pub fn with_stdlib(
        options: EngineOptions,
        init: impl FnOnce(&mut FunctionRegistry) -> Result<(), RegistrationError>,
    ) -> Result<Self, Error> {
        Self::new(options, |registry| {
            stdlib::register_stdlib(registry)?;
            init(registry)
        })
    }

    /// Access the function registry.
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Parse an expression.
    ///
    /// Identifiers and function names are not resolved here; an unknown
    /// function is a runtime error, reported when the call is reached.
    pub fn compile(&self, source: &str) -> Result<CompiledExpression, Error> {
        let expr = parser::parse_with_max_depth(source, self.options.max_parse_depth)?;
        Ok(CompiledExpression::new(
            expr,
            source.to_string(),
            Arc::clone(&self.registry),
            self.options,
        ))
    }

    /// Compile and run an expression with default execution options.
    pub fn eval(&self, source: &str) -> Result<Value, Error> {
        self.compile(source)?.run(ExecutionOptions::default())
    }
}
