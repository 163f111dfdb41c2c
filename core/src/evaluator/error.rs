//! Runtime evaluation errors.
//!
//! # Error Categories
//!
//! - **Runtime errors**: failures that follow from the expression and the
//!   registry contents (unknown function, type mismatch, division by zero).
//!
//! - **Resource exceeded errors**: the evaluation depth guard fired. These are
//!   reported separately at the API boundary, see
//!   [`ErrorKind::is_resource_exceeded`].

use crate::api::{Diagnostic, Severity};
use crate::diagnostics::Context;
use crate::parser::Span;
use crate::values::Kind;

/// Runtime evaluation error, pointing at the node that produced it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} at {span}")]
pub struct EvalError {
    pub kind: ErrorKind,
    pub span: Span,
    pub context: Vec<Context>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    /// Expressions have no variable bindings; any bare identifier fails.
    #[error("Unsupported identifier '{name}'")]
    UnsupportedIdentifier { name: String },

    #[error("Unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("Function '{function}' expects {expected} argument(s), got {got}")]
    ArityMismatch {
        function: String,
        expected: usize,
        got: usize,
    },

    /// `operation` is a function name or a quoted operator symbol.
    #[error("Type mismatch in {operation}: {message}")]
    TypeMismatch {
        operation: String,
        message: String,
        argument: Option<usize>,
    },

    #[error("Function '{function}' returned {got} results, expected exactly 1")]
    InvalidResultArity { function: String, got: usize },

    #[error("Operator '{op}' is not supported for {operand} operands")]
    UnsupportedOperator { op: &'static str, operand: Kind },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Function '{function}' failed: {message}")]
    FunctionFailed { function: String, message: String },

    #[error("Evaluation stack overflow: depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },
}

impl ErrorKind {
    pub fn is_resource_exceeded(&self) -> bool {
        matches!(self, ErrorKind::StackOverflow { .. })
    }

    fn code(&self) -> &'static str {
        match self {
            ErrorKind::UnsupportedIdentifier { .. } => "R001",
            ErrorKind::UnknownFunction { .. } => "R002",
            ErrorKind::ArityMismatch { .. } => "R003",
            ErrorKind::TypeMismatch { .. } => "R004",
            ErrorKind::InvalidResultArity { .. } => "R005",
            ErrorKind::UnsupportedOperator { .. } => "R006",
            ErrorKind::DivisionByZero => "R007",
            ErrorKind::FunctionFailed { .. } => "R008",
            ErrorKind::StackOverflow { .. } => "R009",
        }
    }

    fn help(&self) -> Vec<String> {
        match self {
            ErrorKind::UnsupportedIdentifier { name } => vec![format!(
                "Expressions have no variables; register a function and call it as `{}()`",
                name
            )],
            ErrorKind::UnknownFunction { name } => {
                vec![format!("Register '{}' before evaluating the expression", name)]
            }
            ErrorKind::TypeMismatch { .. } => {
                vec!["Integer and float values do not mix; convert with `int()` or `float()`".to_string()]
            }
            ErrorKind::DivisionByZero => {
                vec!["Integer division requires a non-zero divisor".to_string()]
            }
            _ => vec![],
        }
    }
}

impl EvalError {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Self {
            kind,
            span,
            context: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context.push(context);
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            message: self.kind.to_string(),
            span: self.span.clone(),
            related: self
                .context
                .iter()
                .map(|ctx| ctx.to_related_info())
                .collect(),
            help: self.kind.help(),
            code: Some(self.kind.code().to_string()),
        }
    }
}
