//! Tree-walking evaluator for Reckon expressions.
//!
//! The evaluator interprets parsed expressions ([`Expr`]) and produces runtime
//! values ([`Value`]). Function calls are resolved through a
//! [`FunctionRegistry`].
//!
//! ## Design Principles
//!
//! - **Never panic**: All adversarial inputs must be handled gracefully
//! - **Stack-safe**: Depth tracking bounds recursion, and `stacker` grows the
//!   stack on demand so the bound holds on small thread stacks
//! - **No coercion**: Int and Float operands never mix; the caller converts explicitly
//!
//! ## Example
//!
//! ```
//! use reckon_core::{evaluator, parser, registry::FunctionRegistry, values::Value};
//!
//! let expr = parser::parse("1 + 2 * 3").unwrap();
//! let result = evaluator::eval(&expr, &FunctionRegistry::new()).unwrap();
//! assert_eq!(result, Value::Float(7.0));
//! ```

mod error;
mod eval;
mod operators;


pub use error::{ErrorKind, EvalError};
pub use eval::Evaluator;

use crate::parser::Expr;
use crate::registry::FunctionRegistry;
use crate::values::Value;

/// Configuration options for the evaluator.
#[derive(Debug, Clone, Copy)]
pub struct EvaluatorOptions {
    /// Maximum evaluation stack depth (for recursion protection).
    ///
    /// Default: 1000
    pub max_depth: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self { max_depth: 1000 }
    }
}

/// Evaluate an expression with default limits.
pub fn eval(expr: &Expr, registry: &FunctionRegistry) -> Result<Value, EvalError> {
    eval_with_options(expr, registry, EvaluatorOptions::default())
}

/// Evaluate an expression with custom limits.
///
/// ## Example
///
/// ```
/// use reckon_core::evaluator::{EvaluatorOptions, eval_with_options};
/// use reckon_core::{parser, registry::FunctionRegistry};
///
/// let expr = parser::parse("-(-(-(1)))").unwrap();
/// let options = EvaluatorOptions { max_depth: 2 };
/// let err = eval_with_options(&expr, &FunctionRegistry::new(), options).unwrap_err();
/// assert!(err.kind.is_resource_exceeded());
/// ```
pub fn eval_with_options(
    expr: &Expr,
    registry: &FunctionRegistry,
    options: EvaluatorOptions,
) -> Result<Value, EvalError> {
    Evaluator::new(options, registry).eval(expr)
}
