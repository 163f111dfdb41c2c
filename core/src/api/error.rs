//! Public error types for the Reckon API.
//!
//! This module defines the stable error types exposed to library users.
//! Internal errors ([`ParseError`], [`EvalError`], [`RegistrationError`]) are
//! converted to these public types at API boundaries.

use core::fmt;

use crate::evaluator::EvalError;
use crate::parser::{ParseError, Span};
use crate::registry::RegistrationError;

/// Public error type for all Reckon operations.
#[derive(Debug)]
pub enum Error {
    /// Invalid API usage (e.g. a rejected function registration).
    Api(String),

    /// Compilation errors. Evaluation never began.
    ///
    /// Contains one or more diagnostics with source locations and context.
    Compilation {
        diagnostics: Vec<Diagnostic>,
        source: String,
    },

    /// Runtime errors during evaluation (e.g. unknown function, type mismatch).
    Runtime {
        diagnostic: Diagnostic,
        source: String,
    },

    /// Resource limits exceeded (evaluation depth).
    ResourceExceeded(String),
}

impl Error {
    /// Attach the source text the error's spans refer to.
    pub fn with_source(self, text: impl Into<String>) -> Self {
        match self {
            Error::Compilation { diagnostics, .. } => Error::Compilation {
                diagnostics,
                source: text.into(),
            },
            Error::Runtime { diagnostic, .. } => Error::Runtime {
                diagnostic,
                source: text.into(),
            },
            other => other,
        }
    }

    /// The source text the error's spans refer to, if any.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            Error::Compilation { source, .. } | Error::Runtime { source, .. } => Some(source),
            Error::Api(_) | Error::ResourceExceeded(_) => None,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Error::Compilation { diagnostics, .. } => diagnostics,
            Error::Runtime { diagnostic, .. } => core::slice::from_ref(diagnostic),
            Error::Api(_) | Error::ResourceExceeded(_) => &[],
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Api(msg) => write!(f, "API error: {}", msg),
            Error::Compilation { diagnostics, .. } => {
                let error_count = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Error)
                    .count();
                match diagnostics.first() {
                    Some(first) if error_count == 1 => write!(f, "{}", first.message),
                    _ => write!(f, "Compilation failed with {} error(s)", error_count),
                }
            }
            Error::Runtime { diagnostic, .. } => write!(f, "{}", diagnostic.message),
            Error::ResourceExceeded(msg) => write!(f, "Resource limit exceeded: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// A diagnostic message (error, warning, or info) with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Related locations that provide additional context.
    pub related: Vec<RelatedInfo>,

    /// Help text suggesting how to fix the issue.
    pub help: Vec<String>,

    /// Optional error code (e.g., "P001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - evaluation cannot succeed.
    Error,
    /// Warning - suspicious input that might be wrong.
    Warning,
    /// Info - informational message.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Related information for a diagnostic (e.g., "'(' opened here").
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedInfo {
    /// Source location of the related information.
    pub span: Span,

    /// Message explaining the relevance.
    pub message: String,
}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        let source = err.source.clone();
        Error::Compilation {
            diagnostics: vec![err.to_diagnostic()],
            source,
        }
    }
}

/// The evaluator does not keep the source text; callers that have it use
/// [`Error::with_source`].
impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        if err.kind.is_resource_exceeded() {
            return Error::ResourceExceeded(err.kind.to_string());
        }
        Error::Runtime {
            diagnostic: err.to_diagnostic(),
            source: String::new(),
        }
    }
}

impl From<RegistrationError> for Error {
    fn from(err: RegistrationError) -> Self {
        Error::Api(err.to_string())
    }
}
