use crate::api::RelatedInfo;
use crate::parser::Span;

/// Context information for error messages.
///
/// Provides additional information about where an error occurred,
/// such as "in call to function 'add'" or "'(' opened here".
/// Each context entry can be converted to a RelatedInfo for diagnostic display.
#[derive(Debug, Clone, PartialEq)]
pub enum Context {
    /// In a function call
    InFunctionCall { name: String, span: Span },
    /// Where a delimiter was opened
    OpenedHere { delimiter: char, span: Span },
}

impl Context {
    pub fn span(&self) -> &Span {
        match self {
            Context::InFunctionCall { span, .. } | Context::OpenedHere { span, .. } => span,
        }
    }

    /// Convert to a RelatedInfo for diagnostic display
    pub fn to_related_info(&self) -> RelatedInfo {
        let message = match self {
            Context::InFunctionCall { name, .. } => format!("in call to function '{}'", name),
            Context::OpenedHere { delimiter, .. } => format!("'{}' opened here", delimiter),
        };
        RelatedInfo {
            span: self.span().clone(),
            message,
        }
    }
}
