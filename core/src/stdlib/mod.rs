//! Reckon Standard Library
//!
//! This module provides the default functions for Reckon expressions:
//! - Math: trigonometric, exponential, rounding and logarithm functions
//! - Conv: conversions between the numeric kinds
//!
//! Nothing is registered implicitly. Call [`register_stdlib`] (or one of the
//! per-package functions) while building a registry.

pub mod conv;
pub mod math;

// Re-export for convenience
pub use conv::register_conv;
pub use math::register_math;

use crate::registry::{FunctionRegistry, RegistrationError};

/// Register all standard library packages in the registry.
///
/// # Example
///
/// ```
/// use reckon_core::registry::FunctionRegistry;
/// use reckon_core::stdlib::register_stdlib;
///
/// let mut registry = FunctionRegistry::new();
/// register_stdlib(&mut registry).unwrap();
/// assert!(registry.contains("sin"));
/// assert!(registry.contains("int"));
/// ```
pub fn register_stdlib(registry: &mut FunctionRegistry) -> Result<(), RegistrationError> {
    register_math(registry)?;
    register_conv(registry)?;
    Ok(())
}
