//! Core of the Reckon expression interpreter.
//!
//! Source text goes through the [`parser`] into an [`parser::Expr`] tree, which
//! the [`evaluator`] walks against a [`registry::FunctionRegistry`]. The
//! [`api`] module wraps both steps behind an [`api::Engine`].

pub mod api;
pub mod diagnostics;
pub mod evaluator;
pub mod parser;
pub mod registry;
pub mod stdlib;
pub mod values;
