#![allow(dead_code)]

use once_cell::sync::Lazy;
use reckon::{
    DynamicFunction, Engine, EngineOptions, Error, FunctionError, NativeFunction, Returns, Value,
};

/// Engine shared by every case: the standard library plus a dynamic `add`
/// and a couple of deliberately misbehaving functions.
pub static ENGINE: Lazy<Engine> = Lazy::new(|| {
    Engine::with_stdlib(EngineOptions::default(), |registry| {
        registry.register(
            "add",
            DynamicFunction::single(2, |args| match (args[0], args[1]) {
                (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(b))),
                (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
                (a, b) => Err(FunctionError::type_mismatch(format!(
                    "cannot add {} and {}",
                    a.kind(),
                    b.kind()
                ))),
            }),
        )?;
        registry.register("nothing", DynamicFunction::new(0, |_| Ok(Default::default())))?;
        registry.register(
            "twice",
            DynamicFunction::new(1, |args| Ok(Returns::from_slice(&[args[0], args[0]]))),
        )?;
        registry.register("double", NativeFunction::unary(|x| x * 2.0))
    })
    .expect("engine construction failed")
});

pub fn eval(input: &str) -> Result<Value, Error> {
    ENGINE.eval(input)
}

pub fn canonical(input: &str) -> String {
    match ENGINE.compile(input) {
        Ok(expr) => expr.expr().to_string(),
        Err(err) => panic!("'{}' failed to compile: {}", input, err),
    }
}

pub fn assert_value(input: &str, expected: Value) {
    match eval(input) {
        Ok(value) => assert_eq!(value, expected, "input: {}", input),
        Err(err) => panic!("'{}' failed: {}", input, reckon::render_error_to_string_no_color(&err)),
    }
}

pub fn assert_approx(input: &str, expected: f64) {
    match eval(input) {
        Ok(Value::Float(value)) => assert!(
            (value - expected).abs() < 1e-9,
            "'{}' evaluated to {}, expected {}",
            input,
            value,
            expected
        ),
        other => panic!("'{}' did not evaluate to a float: {:?}", input, other),
    }
}

/// Check the error code of the first diagnostic and its message.
pub fn assert_error(input: &str, code: &str, message: &str) {
    let err = match eval(input) {
        Ok(value) => panic!("'{}' evaluated to {} instead of failing", input, value),
        Err(err) => err,
    };
    let diagnostics = err.diagnostics();
    let Some(first) = diagnostics.first() else {
        panic!("'{}' failed without diagnostics: {}", input, err);
    };
    assert_eq!(first.code.as_deref(), Some(code), "input: {}", input);
    assert_eq!(first.message, message, "input: {}", input);
}

#[macro_export]
macro_rules! test_case {
    (name: $name:ident, input: $input:expr, value: $value:expr $(,)?) => {
        #[test]
        fn $name() {
            cases::assert_value($input, $value);
        }
    };
    (name: $name:ident, input: $input:expr, approx: $value:expr $(,)?) => {
        #[test]
        fn $name() {
            cases::assert_approx($input, $value);
        }
    };
    (name: $name:ident, input: $input:expr, canonical: $canonical:expr, value: $value:expr $(,)?) => {
        #[test]
        fn $name() {
            pretty_assertions::assert_eq!(cases::canonical($input), $canonical);
            cases::assert_value($input, $value);
            cases::assert_value($canonical, $value);
        }
    };
    (name: $name:ident, input: $input:expr, error: $code:literal, message: $message:expr $(,)?) => {
        #[test]
        fn $name() {
            cases::assert_error($input, $code, $message);
        }
    };
}
