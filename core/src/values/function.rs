//! Callable values.
//!
//! Every callable implements the [`Function`] trait. Two models are provided:
//!
//! - [`NativeFunction`]: a fixed [`Signature`] known at registration. The
//!   dispatcher checks argument kinds against it before calling, and checks
//!   the result kind afterwards.
//! - [`DynamicFunction`]: only an arity is declared. Arguments arrive as
//!   opaque [`Value`]s and the function inspects their kinds itself,
//!   reporting [`FunctionError::TypeMismatch`] when they do not fit.

use core::fmt;

use smallvec::{SmallVec, smallvec};

use super::value::{Kind, TypeError, Value};

/// Results produced by one invocation. The dispatcher accepts exactly one.
pub type Returns = SmallVec<[Value; 1]>;

/// Failure reported by a callable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FunctionError {
    /// Operand kinds the function cannot work with.
    #[error("{message}")]
    TypeMismatch {
        message: String,
        /// Zero-based index of the offending argument, when known.
        argument: Option<usize>,
    },
    /// The function received the wrong number of arguments.
    #[error("expected {expected} argument(s), got {got}")]
    Arity { expected: usize, got: usize },
    /// Any other domain failure (e.g. a conversion out of range).
    #[error("{message}")]
    Failed { message: String },
}

impl FunctionError {
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        FunctionError::TypeMismatch {
            message: message.into(),
            argument: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        FunctionError::Failed {
            message: message.into(),
        }
    }

    /// Attribute a type mismatch to the argument at `index`.
    pub fn at_argument(self, index: usize) -> Self {
        match self {
            FunctionError::TypeMismatch { message, .. } => FunctionError::TypeMismatch {
                message,
                argument: Some(index),
            },
            other => other,
        }
    }
}

impl From<TypeError> for FunctionError {
    fn from(err: TypeError) -> Self {
        FunctionError::type_mismatch(err.to_string())
    }
}

/// Declared parameter and result kinds of a fixed-signature function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Kind>,
    pub result: Kind,
}

impl Signature {
    pub fn new(params: impl Into<Vec<Kind>>, result: Kind) -> Self {
        Self {
            params: params.into(),
            result,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ") -> {}", self.result)
    }
}

/// Trait for callable functions.
///
/// Implementors must be `Send + Sync` so that a registry can be shared across
/// threads once it has been built.
///
/// `call` is normally reached through the registry's dispatcher, which checks
/// the arity (and the signature, if any) first and requires exactly one
/// result. Implementations still validate their own inputs and never panic on
/// bad arguments: a mismatch is an ordinary [`FunctionError`].
pub trait Function: Send + Sync {
    /// Number of parameters the function declares.
    fn arity(&self) -> usize;

    /// Declared signature, for fixed-signature functions.
    fn signature(&self) -> Option<&Signature> {
        None
    }

    fn call(&self, args: &[Value]) -> Result<Returns, FunctionError>;
}

type NativeBody = dyn Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync;

/// A function with a fixed signature.
///
/// # Example
///
/// ```
/// use reckon_core::values::{Function, NativeFunction, Value};
///
/// let sin = NativeFunction::unary(f64::sin);
/// assert_eq!(sin.arity(), 1);
/// assert_eq!(sin.call(&[Value::Float(0.0)]).unwrap()[0], Value::Float(0.0));
/// ```
pub struct NativeFunction {
    signature: Signature,
    func: Box<NativeBody>,
}

impl NativeFunction {
    /// Create a new native function with its type signature.
    pub fn new(
        signature: Signature,
        func: impl Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            signature,
            func: Box::new(func),
        }
    }

    /// Wrap a `float -> float` function.
    pub fn unary(f: fn(f64) -> f64) -> Self {
        Self::new(Signature::new([Kind::Float], Kind::Float), move |args| {
            let [x] = args else {
                return Err(FunctionError::Arity {
                    expected: 1,
                    got: args.len(),
                });
            };
            let x = x.as_float().map_err(|e| FunctionError::from(e).at_argument(0))?;
            Ok(Value::Float(f(x)))
        })
    }

    /// Wrap a `(float, float) -> float` function.
    pub fn binary(f: fn(f64, f64) -> f64) -> Self {
        Self::new(
            Signature::new([Kind::Float, Kind::Float], Kind::Float),
            move |args| {
                let [a, b] = args else {
                    return Err(FunctionError::Arity {
                        expected: 2,
                        got: args.len(),
                    });
                };
                let a = a.as_float().map_err(|e| FunctionError::from(e).at_argument(0))?;
                let b = b.as_float().map_err(|e| FunctionError::from(e).at_argument(1))?;
                Ok(Value::Float(f(a, b)))
            },
        )
    }
}

impl Function for NativeFunction {
    fn arity(&self) -> usize {
        self.signature.params.len()
    }

    fn signature(&self) -> Option<&Signature> {
        Some(&self.signature)
    }

    fn call(&self, args: &[Value]) -> Result<Returns, FunctionError> {
        (self.func)(args).map(|value| smallvec![value])
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

type DynamicBody = dyn Fn(&[Value]) -> Result<Returns, FunctionError> + Send + Sync;

/// A function whose parameters are opaque dynamic values.
///
/// # Example
///
/// ```
/// use reckon_core::values::{DynamicFunction, Function, FunctionError, Value};
///
/// let add = DynamicFunction::single(2, |args| match (args[0], args[1]) {
///     (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a + b)),
///     (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
///     _ => Err(FunctionError::type_mismatch("operands must have the same kind")),
/// });
/// assert_eq!(add.call(&[Value::Int(5), Value::Int(3)]).unwrap()[0], Value::Int(8));
/// assert!(add.call(&[Value::Float(5.0), Value::Int(3)]).is_err());
/// ```
pub struct DynamicFunction {
    arity: usize,
    func: Box<DynamicBody>,
}

impl DynamicFunction {
    /// A function producing any number of results. The dispatcher rejects
    /// anything other than exactly one.
    pub fn new(
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Returns, FunctionError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            arity,
            func: Box::new(func),
        }
    }

    /// A function producing a single result.
    pub fn single(
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
    ) -> Self {
        Self::new(arity, move |args| func(args).map(|value| smallvec![value]))
    }
}

impl Function for DynamicFunction {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, args: &[Value]) -> Result<Returns, FunctionError> {
        // The closure may index `args` freely once the count is right.
        if args.len() != self.arity {
            return Err(FunctionError::Arity {
                expected: self.arity,
                got: args.len(),
            });
        }
        (self.func)(args)
    }
}

impl fmt::Debug for DynamicFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicFunction")
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}
