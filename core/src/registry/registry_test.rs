use std::sync::Arc;

use pretty_assertions::assert_eq;
use smallvec::smallvec;

use super::{FunctionRegistry, RegistrationError, dispatch};
use crate::evaluator::ErrorKind;
use crate::values::{
    DynamicFunction, Function, FunctionError, Kind, NativeFunction, Returns, Signature, Value,
};

fn add() -> DynamicFunction {
    DynamicFunction::single(2, |args| match (args[0], args[1]) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(b))),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
        (a, b) => Err(FunctionError::type_mismatch(format!(
            "cannot add {} and {}",
            a.kind(),
            b.kind()
        ))),
    })
}

fn registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    registry
        .register("sin", NativeFunction::unary(f64::sin))
        .unwrap();
    registry.register("add", add()).unwrap();
    registry
}

#[test]
fn test_register_and_lookup() {
    crate::test_utils::init_test_logging();
    let registry = registry();
    assert_eq!(registry.len(), 2);
    assert!(!registry.is_empty());
    assert!(registry.contains("sin"));
    assert!(!registry.contains("cos"));
    assert_eq!(registry.lookup("sin").map(|f| f.arity()), Some(1));
    assert!(registry.lookup("cos").is_none());
    assert_eq!(registry.names(), vec!["add", "sin"]);
}

#[test]
fn test_duplicate_registration() {
    let mut registry = registry();
    assert_eq!(
        registry.register("sin", NativeFunction::unary(f64::cos)),
        Err(RegistrationError::Duplicate {
            name: "sin".to_string()
        })
    );
}

#[test]
fn test_invalid_names() {
    let mut registry = FunctionRegistry::new();
    for name in ["", "1abc", "a b", "f(x)", "-neg"] {
        assert_eq!(
            registry.register(name, NativeFunction::unary(f64::abs)),
            Err(RegistrationError::InvalidName {
                name: name.to_string()
            }),
            "name {:?}",
            name
        );
    }
    assert!(
        registry
            .register("math.sin", NativeFunction::unary(f64::sin))
            .is_ok()
    );
    assert!(registry.register("_x1", NativeFunction::unary(f64::abs)).is_ok());
}

#[test]
fn test_register_any_callable_shapes() {
    let mut registry = FunctionRegistry::new();
    registry
        .register_any("sqrt", f64::sqrt as fn(f64) -> f64)
        .unwrap();
    registry
        .register_any("pow", f64::powf as fn(f64, f64) -> f64)
        .unwrap();
    let shared: Arc<dyn Function> = Arc::new(NativeFunction::unary(f64::exp));
    registry.register_any("exp", shared).unwrap();
    registry
        .register_any("abs", NativeFunction::unary(f64::abs))
        .unwrap();
    registry.register_any("add", add()).unwrap();

    assert_eq!(registry.call("sqrt", &[Value::Float(9.0)]), Ok(Value::Float(3.0)));
    assert_eq!(
        registry.call("pow", &[Value::Float(2.0), Value::Float(10.0)]),
        Ok(Value::Float(1024.0))
    );
    assert_eq!(registry.call("exp", &[Value::Float(0.0)]), Ok(Value::Float(1.0)));
    assert_eq!(registry.call("abs", &[Value::Float(-2.0)]), Ok(Value::Float(2.0)));
    assert_eq!(
        registry.call("add", &[Value::Int(2), Value::Int(3)]),
        Ok(Value::Int(5))
    );
}

#[test]
fn test_register_any_rejects_non_callables() {
    let mut registry = FunctionRegistry::new();
    assert_eq!(
        registry.register_any("pi", 3.14_f64),
        Err(RegistrationError::NotCallable {
            name: "pi".to_string(),
            type_name: "f64",
        })
    );
    assert!(matches!(
        registry.register_any("s", "hello".to_string()),
        Err(RegistrationError::NotCallable { .. })
    ));
    assert!(registry.is_empty());
}

#[test]
fn test_unknown_function() {
    assert_eq!(
        registry().call("log", &[Value::Float(2.0)]),
        Err(ErrorKind::UnknownFunction {
            name: "log".to_string()
        })
    );
}

#[test]
fn test_arity_checked_before_call() {
    let registry = registry();
    assert_eq!(
        registry.call("sin", &[]),
        Err(ErrorKind::ArityMismatch {
            function: "sin".to_string(),
            expected: 1,
            got: 0,
        })
    );
    assert_eq!(
        registry.call("sin", &[Value::Float(1.0), Value::Float(2.0)]),
        Err(ErrorKind::ArityMismatch {
            function: "sin".to_string(),
            expected: 1,
            got: 2,
        })
    );
}

#[test]
fn test_fixed_signature_argument_kinds() {
    let err = registry().call("sin", &[Value::Int(1)]).unwrap_err();
    assert_eq!(
        err,
        ErrorKind::TypeMismatch {
            operation: "'sin'".to_string(),
            message: "argument 1 expects float, found int".to_string(),
            argument: Some(0),
        }
    );
}

#[test]
fn test_dynamic_function_reports_type_mismatch() {
    let err = registry()
        .call("add", &[Value::Float(5.0), Value::Int(3)])
        .unwrap_err();
    assert!(matches!(
        err,
        ErrorKind::TypeMismatch { ref operation, .. } if operation == "'add'"
    ));
}

#[test]
fn test_result_count_must_be_one() {
    let mut registry = FunctionRegistry::new();
    registry
        .register("none", DynamicFunction::new(0, |_| Ok(Returns::new())))
        .unwrap();
    registry
        .register(
            "pair",
            DynamicFunction::new(0, |_| Ok(smallvec![Value::Int(1), Value::Int(2)])),
        )
        .unwrap();

    assert_eq!(
        registry.call("none", &[]),
        Err(ErrorKind::InvalidResultArity {
            function: "none".to_string(),
            got: 0,
        })
    );
    assert_eq!(
        registry.call("pair", &[]),
        Err(ErrorKind::InvalidResultArity {
            function: "pair".to_string(),
            got: 2,
        })
    );
}

#[test]
fn test_fixed_signature_result_kind() {
    let liar = NativeFunction::new(Signature::new([Kind::Float], Kind::Float), |_| {
        Ok(Value::Bool(true))
    });
    let err = dispatch("liar", &liar, &[Value::Float(1.0)]).unwrap_err();
    assert_eq!(
        err,
        ErrorKind::TypeMismatch {
            operation: "'liar'".to_string(),
            message: "declared result float, returned bool".to_string(),
            argument: None,
        }
    );
}

#[test]
fn test_function_failure_is_reported() {
    let failing = DynamicFunction::single(1, |_| Err(FunctionError::failed("out of range")));
    assert_eq!(
        dispatch("conv", &failing, &[Value::Float(1e300)]),
        Err(ErrorKind::FunctionFailed {
            function: "conv".to_string(),
            message: "out of range".to_string(),
        })
    );
}

#[test]
fn test_registry_is_shareable_across_threads() {
    let registry = Arc::new(registry());
    std::thread::scope(|scope| {
        for i in 0..4 {
            let registry = Arc::clone(&registry);
            scope.spawn(move || {
                let x = i as f64;
                assert_eq!(
                    registry.call("add", &[Value::Float(x), Value::Float(1.0)]),
                    Ok(Value::Float(x + 1.0))
                );
            });
        }
    });
}
