use crate::api::{Diagnostic, Severity};
use crate::diagnostics::context::Context;
use crate::parser::{Rule, Span};

/// Parser error with context
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source: String,
    pub span: Span,
    pub context: Vec<Context>,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Source is empty or only whitespace
    EmptyInput,
    /// Unexpected token
    UnexpectedToken { expected: String, found: String },
    /// Opening delimiter never closed
    UnclosedDelimiter { delimiter: char },
    /// Closing delimiter without a matching opening one
    UnmatchedDelimiter { delimiter: char },
    /// Invalid number literal
    InvalidNumber { text: String },
    /// Maximum nesting depth exceeded
    MaxDepthExceeded { depth: usize, max_depth: usize },
    /// Other parse errors (catch-all for Pest errors we don't specifically handle)
    Other { message: String },
}

impl ParseError {
    /// Create a new ParseError with no context
    pub fn new(kind: ParseErrorKind, source: String, span: Span) -> Self {
        Self {
            kind,
            source,
            span,
            context: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context.push(context);
        self
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, code, help) = match &self.kind {
            ParseErrorKind::EmptyInput => (
                "Expected an expression, found empty input".to_string(),
                "P000",
                vec!["Write an arithmetic expression such as `1 + 2`".to_string()],
            ),
            ParseErrorKind::UnexpectedToken { expected, found } => (
                format!("Expected {}, found {}", expected, found),
                "P001",
                vec![],
            ),
            ParseErrorKind::UnclosedDelimiter { delimiter } => (
                format!("Unclosed delimiter '{}'", delimiter),
                "P002",
                vec!["Add the missing closing delimiter".to_string()],
            ),
            ParseErrorKind::UnmatchedDelimiter { delimiter } => (
                format!("Unmatched closing delimiter '{}'", delimiter),
                "P002",
                vec!["Remove the delimiter or add the matching opening one".to_string()],
            ),
            ParseErrorKind::InvalidNumber { text } => (
                format!("Invalid number literal '{}'", text),
                "P003",
                vec!["Check the number format".to_string()],
            ),
            ParseErrorKind::MaxDepthExceeded { max_depth, .. } => (
                format!(
                    "Expression nesting depth exceeds maximum of {} levels",
                    max_depth
                ),
                "P004",
                vec!["Reduce nesting or simplify the expression".to_string()],
            ),
            ParseErrorKind::Other { message } => (message.clone(), "P999", vec![]),
        };

        Diagnostic {
            severity: Severity::Error,
            message,
            span: self.span.clone(),
            related: self
                .context
                .iter()
                .map(|ctx| ctx.to_related_info())
                .collect(),
            help,
            code: Some(code.to_string()),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let diagnostic = self.to_diagnostic();
        write!(f, "{}: {}", diagnostic.severity, diagnostic.message)?;

        if let Some(ref code) = diagnostic.code {
            write!(f, " [{}]", code)?;
        }

        for help_msg in &diagnostic.help {
            write!(f, "\nhelp: {}", help_msg)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Convert Pest error to human-readable ParseError
pub fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> ParseError {
    use pest::error::ErrorVariant;

    // Unbalanced parentheses are reported as such, whatever token pest
    // happened to stop at.
    if let Some(error) = check_delimiters(source) {
        return error;
    }

    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => Span(pos..pos),
        pest::error::InputLocation::Span((start, end)) => Span(start..end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError { positives, .. } => ParseErrorKind::UnexpectedToken {
            expected: format_expected_rules(&positives),
            found: describe_found(source, span.start()),
        },
        ErrorVariant::CustomError { message } => ParseErrorKind::Other { message },
    };

    ParseError::new(kind, source.to_string(), span)
}

/// Report the first unbalanced parenthesis in `source`, if any.
pub(crate) fn check_delimiters(source: &str) -> Option<ParseError> {
    let mut open = Vec::new();
    for (pos, c) in source.char_indices() {
        match c {
            '(' => open.push(pos),
            ')' => {
                if open.pop().is_none() {
                    return Some(ParseError::new(
                        ParseErrorKind::UnmatchedDelimiter { delimiter: ')' },
                        source.to_string(),
                        Span::new(pos, pos + 1),
                    ));
                }
            }
            _ => {}
        }
    }
    let pos = open.pop()?;
    let end = source.len();
    Some(
        ParseError::new(
            ParseErrorKind::UnclosedDelimiter { delimiter: '(' },
            source.to_string(),
            Span::new(end, end),
        )
        .with_context(Context::OpenedHere {
            delimiter: '(',
            span: Span::new(pos, pos + 1),
        }),
    )
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    if rules.is_empty() {
        return "something else".to_string();
    }

    // Group related rules into higher-level concepts
    let mut concepts = Vec::new();

    for rule in rules {
        let concept = match rule {
            Rule::integer | Rule::float | Rule::malformed_number => "number",
            Rule::ident => "identifier",
            Rule::add | Rule::sub | Rule::mul | Rule::div => "operator",
            Rule::EOI => "end of input",
            _ => "expression",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        None => "something else".to_string(),
    }
}

/// Describe the text found at `pos` in a human-readable way
fn describe_found(source: &str, pos: usize) -> String {
    let rest = source.get(pos..).unwrap_or("").trim_start();
    let Some(c) = rest.chars().next() else {
        return "end of input".to_string();
    };
    if c.is_ascii_alphabetic() || c == '_' {
        let word: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
            .collect();
        format!("identifier '{}'", word)
    } else if c.is_ascii_digit() {
        let digits: String = rest
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        format!("number '{}'", digits)
    } else {
        format!("'{}'", c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_to_diagnostic() {
        let error = ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: "expression".to_string(),
                found: "','".to_string(),
            },
            "test source".to_string(),
            Span(10..20),
        );

        let diagnostic = error.to_diagnostic();
        assert_eq!(diagnostic.severity, Severity::Error);
        assert!(diagnostic.message.contains("Expected expression"));
        assert!(diagnostic.message.contains("found ','"));
        assert_eq!(diagnostic.code, Some("P001".to_string()));
    }

    #[test]
    fn test_format_expected_rules() {
        let rules = vec![Rule::integer, Rule::float];
        assert_eq!(format_expected_rules(&rules), "number");

        let rules = vec![Rule::neg, Rule::integer, Rule::ident];
        assert_eq!(
            format_expected_rules(&rules),
            "expression, number or identifier"
        );
    }

    #[test]
    fn test_describe_found() {
        assert_eq!(describe_found("1 + ", 3), "end of input");
        assert_eq!(describe_found("1 abc", 1), "identifier 'abc'");
        assert_eq!(describe_found("1 ,", 2), "','");
    }

    #[test]
    fn test_unclosed_delimiter_points_at_open_paren() {
        let err = check_delimiters("(1 + (2)").expect("should be unbalanced");
        assert_eq!(
            err.kind,
            ParseErrorKind::UnclosedDelimiter { delimiter: '(' }
        );
        assert_eq!(err.span, Span(8..8));
        let related = err.to_diagnostic().related;
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].span, Span(0..1));
    }

    #[test]
    fn test_unmatched_closing_delimiter() {
        let err = check_delimiters("1 + 2)").expect("should be unbalanced");
        assert_eq!(
            err.kind,
            ParseErrorKind::UnmatchedDelimiter { delimiter: ')' }
        );
        assert_eq!(err.span, Span(5..6));
    }

    #[test]
    fn test_balanced_delimiters() {
        assert!(check_delimiters("((1) + (2 * (3)))").is_none());
    }

    #[test]
    fn test_display_includes_code_and_help() {
        let error = ParseError::new(
            ParseErrorKind::InvalidNumber {
                text: "1.2.3".to_string(),
            },
            "1.2.3".to_string(),
            Span(0..5),
        );
        let rendered = error.to_string();
        assert!(rendered.starts_with("error: Invalid number literal '1.2.3' [P003]"));
        assert!(rendered.contains("help: Check the number format"));
    }
}
