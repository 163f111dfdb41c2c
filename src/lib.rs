//! Reckon - arithmetic expressions over a registry of host functions
//!
//! # Overview
//!
//! Reckon parses infix arithmetic expressions (`+ - * /`, unary minus and
//! plus, parentheses, function calls) and evaluates them with a tree-walking
//! interpreter. Function calls are resolved against a registry filled by the
//! host application, holding either fixed-signature functions or dynamic ones
//! that inspect their arguments' kinds at runtime.
//!
//! # Quick Start
//!
//! ```
//! use reckon::{Engine, EngineOptions, ExecutionOptions, NativeFunction, Value};
//!
//! // Create an engine with the standard library and one extra function
//! let engine = Engine::with_stdlib(EngineOptions::default(), |registry| {
//!     registry.register("half", NativeFunction::unary(|x| x / 2.0))
//! })
//! .unwrap();
//!
//! // Compile an expression
//! let expr = engine.compile("half(10) + sin(0)").unwrap();
//!
//! // Execute
//! let result = expr.run(ExecutionOptions::default()).unwrap();
//! assert_eq!(result, Value::Float(5.0));
//! ```
//!
//! # Dynamic functions
//!
//! A [`DynamicFunction`] only declares its arity and receives opaque
//! [`Value`]s:
//!
//! ```
//! use reckon::{DynamicFunction, Engine, EngineOptions, Error, FunctionError, Value};
//!
//! let engine = Engine::with_stdlib(EngineOptions::default(), |registry| {
//!     registry.register(
//!         "add",
//!         DynamicFunction::single(2, |args| match (args[0], args[1]) {
//!             (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(b))),
//!             (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
//!             _ => Err(FunctionError::type_mismatch("operands must have the same kind")),
//!         }),
//!     )
//! })
//! .unwrap();
//!
//! assert_eq!(engine.eval("add(int(5), int(3))").unwrap(), Value::Int(8));
//! assert!(matches!(engine.eval("add(int(5), 3)"), Err(Error::Runtime { .. })));
//! ```

// Re-export public API from reckon_core
pub use reckon_core::api::{
    CompiledExpression, Diagnostic, Engine, EngineOptions, Error, ExecutionOptions, RelatedInfo,
    Severity,
};

// Re-export commonly used types and values
pub use reckon_core::registry::{FunctionRegistry, RegistrationError};
pub use reckon_core::values::{
    self, DynamicFunction, Function, FunctionError, Kind, NativeFunction, Returns, Signature,
    Value,
};
pub use reckon_core::{evaluator, parser, stdlib};

// Re-export errors
pub use reckon_core::evaluator::{ErrorKind, EvalError};
pub use reckon_core::parser::{ParseError, ParseErrorKind};

mod error_renderer;
pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
