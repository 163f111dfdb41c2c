//! Function registry and dynamic dispatch.
//!
//! A [`FunctionRegistry`] maps names to callables. It is filled once during
//! setup and then only read: the [`crate::api::Engine`] freezes it behind an
//! `Arc` so concurrent evaluations share it without locking.
//!
//! Names are flat strings. A qualified name such as `math.sin` is a single
//! key; there is no package object behind the dot.

use core::any::{Any, type_name};
use std::sync::Arc;

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::evaluator::ErrorKind;
use crate::values::{DynamicFunction, Function, FunctionError, NativeFunction, Value};

#[cfg(test)]
mod registry_test;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("value registered as '{name}' is not callable (type {type_name})")]
    NotCallable {
        name: String,
        type_name: &'static str,
    },
    #[error("invalid function name '{name}'")]
    InvalidName { name: String },
    #[error("function '{name}' is already registered")]
    Duplicate { name: String },
}

#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn Function>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callable under `name`.
    ///
    /// # Example
    ///
    /// ```
    /// use reckon_core::registry::FunctionRegistry;
    /// use reckon_core::values::NativeFunction;
    ///
    /// let mut registry = FunctionRegistry::new();
    /// registry.register("sin", NativeFunction::unary(f64::sin)).unwrap();
    /// assert!(registry.contains("sin"));
    /// ```
    pub fn register(
        &mut self,
        name: &str,
        function: impl Function + 'static,
    ) -> Result<(), RegistrationError> {
        self.register_arc(name, Arc::new(function))
    }

    pub fn register_arc(
        &mut self,
        name: &str,
        function: Arc<dyn Function>,
    ) -> Result<(), RegistrationError> {
        if !is_valid_name(name) {
            return Err(RegistrationError::InvalidName {
                name: name.to_string(),
            });
        }
        if self.functions.contains_key(name) {
            return Err(RegistrationError::Duplicate {
                name: name.to_string(),
            });
        }
        debug!(
            name,
            arity = function.arity(),
            fixed = function.signature().is_some(),
            "registered function"
        );
        self.functions.insert(name.to_string(), function);
        Ok(())
    }

    /// Register an arbitrary value, accepting it only if it has one of the
    /// recognised callable shapes:
    ///
    /// - `fn(f64) -> f64` and `fn(f64, f64) -> f64` (fixed float signatures),
    /// - `Arc<dyn Function>`, [`NativeFunction`] or [`DynamicFunction`].
    ///
    /// Function items must be cast to a function pointer first, e.g.
    /// `f64::sin as fn(f64) -> f64`.
    pub fn register_any<T: Any + Send + Sync>(
        &mut self,
        name: &str,
        value: T,
    ) -> Result<(), RegistrationError> {
        let value: Box<dyn Any + Send + Sync> = Box::new(value);
        let value = match value.downcast::<fn(f64) -> f64>() {
            Ok(f) => return self.register(name, NativeFunction::unary(*f)),
            Err(value) => value,
        };
        let value = match value.downcast::<fn(f64, f64) -> f64>() {
            Ok(f) => return self.register(name, NativeFunction::binary(*f)),
            Err(value) => value,
        };
        let value = match value.downcast::<Arc<dyn Function>>() {
            Ok(f) => return self.register_arc(name, *f),
            Err(value) => value,
        };
        let value = match value.downcast::<NativeFunction>() {
            Ok(f) => return self.register(name, *f),
            Err(value) => value,
        };
        match value.downcast::<DynamicFunction>() {
            Ok(f) => self.register(name, *f),
            Err(_) => Err(RegistrationError::NotCallable {
                name: name.to_string(),
                type_name: type_name::<T>(),
            }),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Function>> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Look up `name` and invoke it with already evaluated arguments.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, ErrorKind> {
        let function = self
            .lookup(name)
            .ok_or_else(|| ErrorKind::UnknownFunction {
                name: name.to_string(),
            })?;
        dispatch(name, function.as_ref(), args)
    }
}

impl core::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("names", &self.names())
            .finish()
    }
}

/// Invoke `function` (registered as `name`) with evaluated arguments.
///
/// Checks, in order: the argument count, the argument kinds against a fixed
/// signature, the callable's own result, the result count (exactly one) and
/// the result kind against a fixed signature.
pub fn dispatch(name: &str, function: &dyn Function, args: &[Value]) -> Result<Value, ErrorKind> {
    trace!(function = name, args = args.len(), "dispatching call");

    let expected = function.arity();
    if args.len() != expected {
        return Err(ErrorKind::ArityMismatch {
            function: name.to_string(),
            expected,
            got: args.len(),
        });
    }

    let signature = function.signature();
    if let Some(signature) = signature {
        for (index, (arg, kind)) in args.iter().zip(&signature.params).enumerate() {
            if arg.kind() != *kind {
                return Err(ErrorKind::TypeMismatch {
                    operation: format!("'{}'", name),
                    message: format!(
                        "argument {} expects {}, found {}",
                        index + 1,
                        kind,
                        arg.kind()
                    ),
                    argument: Some(index),
                });
            }
        }
    }

    let returns = function
        .call(args)
        .map_err(|err| function_error(name, err))?;
    if returns.len() != 1 {
        return Err(ErrorKind::InvalidResultArity {
            function: name.to_string(),
            got: returns.len(),
        });
    }
    let result = returns[0];

    if let Some(signature) = signature {
        if result.kind() != signature.result {
            return Err(ErrorKind::TypeMismatch {
                operation: format!("'{}'", name),
                message: format!(
                    "declared result {}, returned {}",
                    signature.result,
                    result.kind()
                ),
                argument: None,
            });
        }
    }

    Ok(result)
}

fn function_error(name: &str, err: FunctionError) -> ErrorKind {
    match err {
        FunctionError::TypeMismatch { message, argument } => ErrorKind::TypeMismatch {
            operation: format!("'{}'", name),
            message,
            argument,
        },
        FunctionError::Arity { expected, got } => ErrorKind::ArityMismatch {
            function: name.to_string(),
            expected,
            got,
        },
        FunctionError::Failed { message } => ErrorKind::FunctionFailed {
            function: name.to_string(),
            message,
        },
    }
}

/// Same shape as identifiers in source: `[A-Za-z_][A-Za-z0-9_.]*`.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
