//! Core evaluation logic.

use smallvec::SmallVec;
use tracing::warn;

use crate::diagnostics::Context;
use crate::evaluator::{ErrorKind, EvalError, EvaluatorOptions, operators};
use crate::parser::{Expr, ExprKind};
use crate::registry::{FunctionRegistry, dispatch};
use crate::values::Value;

/// Remaining stack below which evaluation moves to a fresh segment.
const STACK_RED_ZONE: usize = 64 * 1024;
/// Size of each additional stack segment.
const STACK_GROW_SIZE: usize = 1024 * 1024;

/// Evaluator for parsed expressions.
pub struct Evaluator<'a> {
    options: EvaluatorOptions,
    registry: &'a FunctionRegistry,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    /// Create a new evaluator with the given options.
    pub fn new(options: EvaluatorOptions, registry: &'a FunctionRegistry) -> Self {
        Self {
            options,
            registry,
            depth: 0,
        }
    }

    /// Evaluate an expression tree.
    pub fn eval(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        self.eval_expr(expr)
    }

    /// Evaluate an expression node.
    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        // Check depth before recursing
        if self.depth >= self.options.max_depth {
            warn!(
                depth = self.depth,
                max_depth = self.options.max_depth,
                "evaluation depth limit reached"
            );
            return Err(EvalError::new(
                ErrorKind::StackOverflow {
                    depth: self.depth,
                    max_depth: self.options.max_depth,
                },
                expr.span.clone(),
            ));
        }

        self.depth += 1;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.eval_expr_inner(expr)
        });
        self.depth -= 1;

        result
    }

    /// Inner evaluation logic (no depth tracking).
    fn eval_expr_inner(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        match &expr.kind {
            ExprKind::Number(value) => Ok(Value::Float(*value)),

            ExprKind::Unary { op, expr: operand } => {
                let value = self.eval_expr(operand)?;
                operators::eval_unary(*op, value)
                    .map_err(|kind| EvalError::new(kind, expr.span.clone()))
            }

            ExprKind::Binary { op, left, right } => {
                // Left to right; a failing left operand stops evaluation.
                let left_val = self.eval_expr(left)?;
                let right_val = self.eval_expr(right)?;
                operators::eval_binary(*op, left_val, right_val)
                    .map_err(|kind| EvalError::new(kind, expr.span.clone()))
            }

            ExprKind::Ident(name) => Err(EvalError::new(
                ErrorKind::UnsupportedIdentifier { name: name.clone() },
                expr.span.clone(),
            )),

            ExprKind::Call { function, args } => self.eval_call(expr, function, args),
        }
    }

    /// Evaluate the arguments left to right, then look up and dispatch.
    ///
    /// Kept out of `eval_expr_inner` so the argument buffer is not part of
    /// every recursive frame.
    #[inline(never)]
    fn eval_call(
        &mut self,
        expr: &Expr,
        function: &str,
        args: &[Expr],
    ) -> Result<Value, EvalError> {
        let mut values: SmallVec<[Value; 4]> = SmallVec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }

        let Some(callable) = self.registry.lookup(function) else {
            return Err(EvalError::new(
                ErrorKind::UnknownFunction {
                    name: function.to_string(),
                },
                expr.span.clone(),
            ));
        };

        dispatch(function, callable.as_ref(), &values)
            .map_err(|kind| call_error(kind, function, expr, args))
    }
}

/// Point a dispatch failure at the offending argument when one is known,
/// keeping the whole call as context.
fn call_error(kind: ErrorKind, function: &str, call: &Expr, args: &[Expr]) -> EvalError {
    let argument = match &kind {
        ErrorKind::TypeMismatch {
            argument: Some(index),
            ..
        } => args.get(*index),
        _ => None,
    };
    match argument {
        Some(arg) => EvalError::new(kind, arg.span.clone()).with_context(Context::InFunctionCall {
            name: function.to_string(),
            span: call.span.clone(),
        }),
        None => EvalError::new(kind, call.span.clone()),
    }
}
