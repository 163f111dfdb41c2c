mod parsed_expr;
pub mod parser;
mod syntax;
pub mod error;

// Re-export the parser and rule enum for external use
pub use parser::ExpressionParser;
pub use parser::Rule;
pub use parser::parse;
pub use parser::parse_with_max_depth;
pub use parser::DEFAULT_MAX_DEPTH;

pub use parsed_expr::{Expr, ExprKind};
pub use syntax::{BinaryOp, Span, UnaryOp};
pub use error::{ParseError, ParseErrorKind};
