//! Compiled Reckon expressions.

use std::sync::Arc;

use super::{EngineOptions, Error, ExecutionOptions};
use crate::evaluator::Evaluator;
use crate::parser::Expr;
use crate::registry::FunctionRegistry;
use crate::values::Value;

/// A parsed expression ready for execution.
///
/// Compiled expressions share their tree and the engine's registry, so they
/// can outlive the [`super::Engine`] that produced them, be cloned cheaply,
/// be sent to other threads and be run any number of times.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    expr: Arc<Expr>,
    source: String,
    registry: Arc<FunctionRegistry>,
    options: EngineOptions,
}

impl CompiledExpression {
    /// Create a new compiled expression.
    ///
    /// This is called internally by Engine::compile().
    pub(crate) fn new(
        expr: Expr,
        source: String,
        registry: Arc<FunctionRegistry>,
        options: EngineOptions,
    ) -> Self {
        Self {
            expr: Arc::new(expr),
            source,
            registry,
            options,
        }
    }

    /// Execute the expression.
    ///
    /// `options` override the engine defaults for this run only.
    ///
    /// # Returns
    ///
    /// The result value, or a runtime error whose spans point into
    /// [`Self::source`].
    pub fn run(&self, options: ExecutionOptions) -> Result<Value, Error> {
        let options = self.options.evaluator_options(options);
        Evaluator::new(options, &self.registry)
            .eval(&self.expr)
            .map_err(|err| Error::from(err).with_source(self.source.as_str()))
    }

    /// The parsed expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The source text the expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }
}
