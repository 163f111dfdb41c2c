use crate::parser::error::convert_pest_error;
use crate::parser::{BinaryOp, Expr, ExprKind, ParseError, ParseErrorKind, Span, UnaryOp};
use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;
use tracing::{debug, warn};

/// Default limit on nesting (parentheses and chained prefix operators).
pub const DEFAULT_MAX_DEPTH: usize = 256;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left)
        )                                               // `+`, `-`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left)
        )                                               // `*`, `/`
        .op(Op::prefix(Rule::neg) | Op::prefix(Rule::pos)) // `-x`, `+x`
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

fn missing_pair(span: Span, source: &str, what: &str) -> ParseError {
    ParseError::new(
        ParseErrorKind::Other {
            message: format!("missing {} in parse tree", what),
        },
        source.to_string(),
        span,
    )
}

fn parse_expr(pair: Pair<'_, Rule>, source: &str) -> Result<Expr, ParseError> {
    let span: Span = pair.as_span().into();
    match pair.as_rule() {
        Rule::expression => PRATT_PARSER
            .map_primary(|primary| parse_expr(primary, source))
            .map_prefix(|op, rhs| {
                let rhs = rhs?;
                let op_kind = match op.as_rule() {
                    Rule::neg => UnaryOp::Neg,
                    Rule::pos => UnaryOp::Plus,
                    rule => return Err(unhandled_rule(rule, op.as_span(), source)),
                };
                let span = Span::new(op.as_span().start(), rhs.span.end());
                Ok(Expr::new(
                    ExprKind::Unary {
                        op: op_kind,
                        expr: Box::new(rhs),
                    },
                    span,
                ))
            })
            .map_infix(|lhs, op, rhs| {
                let (lhs, rhs) = (lhs?, rhs?);
                let op = match op.as_rule() {
                    Rule::add => BinaryOp::Add,
                    Rule::sub => BinaryOp::Sub,
                    Rule::mul => BinaryOp::Mul,
                    Rule::div => BinaryOp::Div,
                    rule => return Err(unhandled_rule(rule, op.as_span(), source)),
                };
                let span = Span::combine(&lhs.span, &rhs.span);
                Ok(Expr::new(
                    ExprKind::Binary {
                        op,
                        left: Box::new(lhs),
                        right: Box::new(rhs),
                    },
                    span,
                ))
            })
            .parse(pair.into_inner()),

        Rule::integer | Rule::float => {
            let text = pair.as_str();
            let value: f64 = text.parse().map_err(|_| {
                ParseError::new(
                    ParseErrorKind::InvalidNumber {
                        text: text.to_string(),
                    },
                    source.to_string(),
                    span.clone(),
                )
            })?;
            Ok(Expr::new(ExprKind::Number(value), span))
        }

        Rule::malformed_number => Err(ParseError::new(
            ParseErrorKind::InvalidNumber {
                text: pair.as_str().to_string(),
            },
            source.to_string(),
            span,
        )),

        Rule::grouped => {
            let inner = pair
                .into_inner()
                .next()
                .ok_or_else(|| missing_pair(span.clone(), source, "grouped expression"))?;
            // The group itself leaves no node behind, only a wider span.
            let mut expr = parse_expr(inner, source)?;
            expr.span = span;
            Ok(expr)
        }

        Rule::call => {
            let mut inner = pair.into_inner();
            let function = inner
                .next()
                .ok_or_else(|| missing_pair(span.clone(), source, "function name"))?
                .as_str()
                .to_string();
            let args = inner
                .map(|arg| parse_expr(arg, source))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::new(ExprKind::Call { function, args }, span))
        }

        Rule::ident => Ok(Expr::new(ExprKind::Ident(pair.as_str().to_string()), span)),

        rule => Err(unhandled_rule(rule, pair.as_span(), source)),
    }
}

fn unhandled_rule(rule: Rule, span: pest::Span<'_>, source: &str) -> ParseError {
    ParseError::new(
        ParseErrorKind::Other {
            message: format!("Unhandled rule: {:?}", rule),
        },
        source.to_string(),
        span.into(),
    )
}

/// Measure how deeply `source` nests.
///
/// Each open parenthesis adds a level, and so does every prefix operator in a
/// chain like `- - - 1`. Checked before handing the input to pest so that
/// adversarial input cannot exhaust the stack of the recursive parser.
fn nesting_depth(source: &str) -> usize {
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    let mut prefix_run = 0usize;
    // A sign is a prefix operator when it does not follow an operand.
    let mut after_operand = false;

    for c in source.chars() {
        match c {
            '(' => {
                depth += 1;
                prefix_run = 0;
                after_operand = false;
            }
            ')' => {
                depth = depth.saturating_sub(1);
                prefix_run = 0;
                after_operand = true;
            }
            '+' | '-' if !after_operand => prefix_run += 1,
            '+' | '-' | '*' | '/' | ',' => {
                prefix_run = 0;
                after_operand = false;
            }
            c if c.is_whitespace() => continue,
            _ => {
                prefix_run = 0;
                after_operand = true;
            }
        }
        max_depth = max_depth.max(depth + prefix_run);
    }

    max_depth
}

/// Parse a single expression with the default nesting limit.
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    parse_with_max_depth(source, DEFAULT_MAX_DEPTH)
}

/// Parse a single expression, rejecting input nested deeper than `max_depth`.
pub fn parse_with_max_depth(source: &str, max_depth: usize) -> Result<Expr, ParseError> {
    if source.trim().is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::EmptyInput,
            source.to_string(),
            Span::new(0, source.len()),
        ));
    }

    let depth = nesting_depth(source);
    if depth > max_depth {
        warn!(depth, max_depth, "expression nesting too deep");
        return Err(ParseError::new(
            ParseErrorKind::MaxDepthExceeded { depth, max_depth },
            source.to_string(),
            Span::new(0, source.len()),
        ));
    }

    let mut pairs = ExpressionParser::parse(Rule::main, source)
        .map_err(|e| convert_pest_error(e, source))?;
    let main = pairs
        .next()
        .ok_or_else(|| missing_pair(Span::new(0, source.len()), source, "main rule"))?;
    let main_span: Span = main.as_span().into();
    let expression = main
        .into_inner()
        .next()
        .ok_or_else(|| missing_pair(main_span, source, "expression"))?;

    let expr = parse_expr(expression, source)?;
    debug!(nodes = expr.size(), "parsed expression");
    Ok(expr)
}
