//! Unit tests for callable values.

use smallvec::smallvec;

use crate::values::{
    DynamicFunction, Function, FunctionError, Kind, NativeFunction, Signature, Value,
};

// ============================================================================
// Native functions
// ============================================================================

#[test]
fn test_unary_native_function() {
    let sqrt = NativeFunction::unary(f64::sqrt);
    assert_eq!(sqrt.arity(), 1);
    assert_eq!(
        sqrt.signature(),
        Some(&Signature::new([Kind::Float], Kind::Float))
    );
    let result = sqrt.call(&[Value::Float(16.0)]).unwrap();
    assert_eq!(result.as_slice(), &[Value::Float(4.0)]);
}

#[test]
fn test_binary_native_function() {
    let atan2 = NativeFunction::binary(f64::atan2);
    assert_eq!(atan2.arity(), 2);
    let result = atan2.call(&[Value::Float(0.0), Value::Float(1.0)]).unwrap();
    assert_eq!(result.as_slice(), &[Value::Float(0.0)]);
}

#[test]
fn test_native_function_validates_its_own_inputs() {
    let sin = NativeFunction::unary(f64::sin);
    assert_eq!(
        sin.call(&[]).unwrap_err(),
        FunctionError::Arity {
            expected: 1,
            got: 0
        }
    );

    let pow = NativeFunction::binary(f64::powf);
    assert_eq!(
        pow.call(&[Value::Float(2.0), Value::Int(3)]).unwrap_err(),
        FunctionError::TypeMismatch {
            message: "expected float, found int".to_string(),
            argument: Some(1),
        }
    );
}

#[test]
fn test_custom_signature() {
    let negate = NativeFunction::new(Signature::new([Kind::Bool], Kind::Bool), |args| {
        Ok(Value::Bool(!args[0].as_bool()?))
    });
    assert_eq!(negate.arity(), 1);
    assert_eq!(
        negate.signature().map(ToString::to_string),
        Some("(bool) -> bool".to_string())
    );
    assert_eq!(
        negate.call(&[Value::Bool(true)]).unwrap().as_slice(),
        &[Value::Bool(false)]
    );
}

// ============================================================================
// Dynamic functions
// ============================================================================

#[test]
fn test_dynamic_function_has_no_signature() {
    let identity = DynamicFunction::single(1, |args| Ok(args[0]));
    assert_eq!(identity.arity(), 1);
    assert!(identity.signature().is_none());
    assert_eq!(
        identity.call(&[Value::Bool(true)]).unwrap().as_slice(),
        &[Value::Bool(true)]
    );
}

#[test]
fn test_dynamic_function_checks_arity_before_running() {
    // Indexing past the end would panic if the count were not checked first.
    let second = DynamicFunction::single(2, |args| Ok(args[1]));
    assert_eq!(
        second.call(&[Value::Int(1)]).unwrap_err(),
        FunctionError::Arity {
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn test_dynamic_function_multiple_results() {
    let split = DynamicFunction::new(1, |args| {
        let x = args[0].as_float()?;
        Ok(smallvec![Value::Float(x.trunc()), Value::Float(x.fract())])
    });
    let results = split.call(&[Value::Float(2.5)]).unwrap();
    assert_eq!(results.len(), 2);
}

#[test]
fn test_at_argument_only_touches_type_mismatches() {
    assert_eq!(
        FunctionError::type_mismatch("bad").at_argument(2),
        FunctionError::TypeMismatch {
            message: "bad".to_string(),
            argument: Some(2),
        }
    );
    assert_eq!(
        FunctionError::failed("boom").at_argument(2),
        FunctionError::failed("boom")
    );
}

#[test]
fn test_signature_display() {
    let sig = Signature::new([Kind::Float, Kind::Int], Kind::Bool);
    assert_eq!(sig.to_string(), "(float, int) -> bool");
    assert_eq!(Signature::new(Vec::new(), Kind::Float).to_string(), "() -> float");
}
