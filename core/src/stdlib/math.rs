//! Math Package
//!
//! Fixed-signature float functions, each registered under its bare name and
//! under a `math.` qualified name.
//!
//! Unary: sin, cos, tan, asin, acos, atan, sinh, cosh, tanh, sqrt, exp, abs,
//!        floor, ceil, round, trunc, ln, log2, log10
//! Binary: atan2, pow, min, max, hypot
//!
//! There is no `log`: its base is ambiguous, so callers pick `ln`, `log2` or
//! `log10` explicitly, or register their own.

use crate::registry::{FunctionRegistry, RegistrationError};
use crate::values::NativeFunction;

const PREFIX: &str = "math";

const UNARY: &[(&str, fn(f64) -> f64)] = &[
    // Trigonometry
    ("sin", f64::sin),
    ("cos", f64::cos),
    ("tan", f64::tan),
    ("asin", f64::asin),
    ("acos", f64::acos),
    ("atan", f64::atan),
    ("sinh", f64::sinh),
    ("cosh", f64::cosh),
    ("tanh", f64::tanh),
    // Exponentiation
    // Note: sqrt of negative returns NaN (IEEE 754 semantics)
    ("sqrt", f64::sqrt),
    ("exp", f64::exp),
    // Rounding; results stay floats
    ("abs", f64::abs),
    ("floor", f64::floor),
    ("ceil", f64::ceil),
    ("round", f64::round),
    ("trunc", f64::trunc),
    // Logarithms
    ("ln", f64::ln),
    ("log2", f64::log2),
    ("log10", f64::log10),
];

const BINARY: &[(&str, fn(f64, f64) -> f64)] = &[
    ("atan2", f64::atan2),
    ("pow", f64::powf),
    ("min", f64::min),
    ("max", f64::max),
    ("hypot", f64::hypot),
];

/// Register the math functions.
///
/// # Example
///
/// ```
/// use reckon_core::registry::FunctionRegistry;
/// use reckon_core::stdlib::register_math;
///
/// let mut registry = FunctionRegistry::new();
/// register_math(&mut registry).unwrap();
/// assert!(registry.contains("sqrt"));
/// assert!(registry.contains("math.sqrt"));
/// ```
pub fn register_math(registry: &mut FunctionRegistry) -> Result<(), RegistrationError> {
    for &(name, f) in UNARY {
        registry.register(name, NativeFunction::unary(f))?;
        registry.register(&format!("{}.{}", PREFIX, name), NativeFunction::unary(f))?;
    }
    for &(name, f) in BINARY {
        registry.register(name, NativeFunction::binary(f))?;
        registry.register(&format!("{}.{}", PREFIX, name), NativeFunction::binary(f))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "math_test.rs"]
mod math_test;
