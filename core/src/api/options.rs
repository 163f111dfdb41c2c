//! Configuration options for the Reckon engine.

use crate::evaluator::EvaluatorOptions;
use crate::parser::DEFAULT_MAX_DEPTH;

/// Configuration options for expression execution.
///
/// Fields left as `None` fall back to the engine's defaults.
///
/// # Example
///
/// ```
/// use reckon_core::api::ExecutionOptions;
///
/// let options = ExecutionOptions {
///     max_depth: Some(500),
/// };
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionOptions {
    /// Maximum evaluation stack depth (for recursion protection).
    pub max_depth: Option<usize>,
}

/// Configuration options for the Reckon engine.
///
/// # Example
///
/// ```
/// use reckon_core::api::EngineOptions;
///
/// let options = EngineOptions {
///     max_depth: 500,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    /// Default maximum evaluation depth.
    ///
    /// Can be overridden per run with [`ExecutionOptions::max_depth`].
    ///
    /// Default: 1000
    pub max_depth: usize,

    /// Maximum nesting of parentheses and prefix operators accepted by the
    /// parser.
    ///
    /// Default: 256
    pub max_parse_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            max_parse_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EngineOptions {
    /// Resolve per-run overrides against these defaults.
    pub fn evaluator_options(&self, overrides: ExecutionOptions) -> EvaluatorOptions {
        EvaluatorOptions {
            max_depth: overrides.max_depth.unwrap_or(self.max_depth),
        }
    }
}
