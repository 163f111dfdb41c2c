pub mod function;
pub mod value;

pub use function::{DynamicFunction, Function, FunctionError, NativeFunction, Returns, Signature};
pub use value::{Kind, TypeError, Value};

#[cfg(test)]
mod function_test;
