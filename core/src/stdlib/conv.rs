//! Conversion Package
//!
//! Dynamic functions that move values between kinds. Number literals are
//! always floats, so `int()` is the way into integer arithmetic and
//! `float()` the way back.
//!
//! Functions: int, float, isnan, isinf

use crate::registry::{FunctionRegistry, RegistrationError};
use crate::values::{DynamicFunction, FunctionError, Value};

/// Largest magnitude (exclusive) an `i64` can hold, exactly representable.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Float to int by truncation toward zero.
fn conv_int(args: &[Value]) -> Result<Value, FunctionError> {
    match args[0] {
        Value::Int(value) => Ok(Value::Int(value)),
        Value::Float(value) => {
            if !value.is_finite() {
                return Err(FunctionError::failed(format!(
                    "cannot convert {} to int",
                    value
                )));
            }
            let truncated = value.trunc();
            if truncated < -I64_BOUND || truncated >= I64_BOUND {
                return Err(FunctionError::failed(format!(
                    "{} is out of range for int",
                    value
                )));
            }
            Ok(Value::Int(truncated as i64))
        }
        Value::Bool(_) => Err(
            FunctionError::type_mismatch("int() expects a number, found bool").at_argument(0),
        ),
    }
}

fn conv_float(args: &[Value]) -> Result<Value, FunctionError> {
    match args[0] {
        Value::Int(value) => Ok(Value::Float(value as f64)),
        Value::Float(value) => Ok(Value::Float(value)),
        Value::Bool(_) => Err(
            FunctionError::type_mismatch("float() expects a number, found bool").at_argument(0),
        ),
    }
}

fn conv_isnan(args: &[Value]) -> Result<Value, FunctionError> {
    match args[0] {
        Value::Int(_) => Ok(Value::Bool(false)),
        Value::Float(value) => Ok(Value::Bool(value.is_nan())),
        Value::Bool(_) => Err(
            FunctionError::type_mismatch("isnan() expects a number, found bool").at_argument(0),
        ),
    }
}

fn conv_isinf(args: &[Value]) -> Result<Value, FunctionError> {
    match args[0] {
        Value::Int(_) => Ok(Value::Bool(false)),
        Value::Float(value) => Ok(Value::Bool(value.is_infinite())),
        Value::Bool(_) => Err(
            FunctionError::type_mismatch("isinf() expects a number, found bool").at_argument(0),
        ),
    }
}

/// Register the conversion functions.
pub fn register_conv(registry: &mut FunctionRegistry) -> Result<(), RegistrationError> {
    registry.register("int", DynamicFunction::single(1, conv_int))?;
    registry.register("float", DynamicFunction::single(1, conv_float))?;
    registry.register("isnan", DynamicFunction::single(1, conv_isnan))?;
    registry.register("isinf", DynamicFunction::single(1, conv_isinf))?;
    Ok(())
}
