use core::fmt;

use crate::parser::{BinaryOp, Span, UnaryOp};

/// A parsed expression node together with the source range it came from.
///
/// Children are owned exclusively by their parent. Parenthesized groups are
/// collapsed by the parser, so a group only shows up as a wider span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Number(f64),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Ident(String),
    Call {
        // Dotted names (`math.sin`) are kept as a single flat key.
        function: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(expr) = pending.pop() {
            count += 1;
            match &expr.kind {
                ExprKind::Number(_) | ExprKind::Ident(_) => {}
                ExprKind::Unary { expr, .. } => pending.push(expr),
                ExprKind::Binary { left, right, .. } => {
                    pending.push(left);
                    pending.push(right);
                }
                ExprKind::Call { args, .. } => pending.extend(args),
            }
        }
        count
    }

    /// Moves the children of this node onto `out`, leaving leaves behind.
    fn take_children(&mut self, out: &mut Vec<Expr>) {
        match &mut self.kind {
            ExprKind::Number(_) | ExprKind::Ident(_) => {}
            ExprKind::Unary { expr, .. } => {
                out.push(core::mem::replace(&mut **expr, Expr::hole()));
            }
            ExprKind::Binary { left, right, .. } => {
                out.push(core::mem::replace(&mut **left, Expr::hole()));
                out.push(core::mem::replace(&mut **right, Expr::hole()));
            }
            ExprKind::Call { args, .. } => out.append(args),
        }
    }

    fn hole() -> Expr {
        Expr::new(ExprKind::Number(0.0), Span::new(0, 0))
    }
}

// Operator chains are one level deeper per term; free them without recursing.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.take_children(&mut pending);
        }
    }
}

enum Piece<'a> {
    Node(&'a Expr),
    Op(BinaryOp),
    Text(&'static str),
}

/// Prints the canonical, fully parenthesized form of the tree.
///
/// Every binary operation gets its own parentheses and every unary operand is
/// wrapped, so the output re-parses to a tree with the same shape.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Node(self)];
        while let Some(piece) = pending.pop() {
            let expr = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Op(op) => {
                    write!(f, " {op} ")?;
                    continue;
                }
                Piece::Node(expr) => expr,
            };
            match &expr.kind {
                ExprKind::Number(value) => write!(f, "{value:?}")?,
                ExprKind::Ident(name) => f.write_str(name)?,
                ExprKind::Unary { op, expr } => {
                    write!(f, "{op}(")?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(expr));
                }
                ExprKind::Binary { op, left, right } => {
                    f.write_str("(")?;
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(right));
                    pending.push(Piece::Op(*op));
                    pending.push(Piece::Node(left));
                }
                ExprKind::Call { function, args } => {
                    write!(f, "{function}(")?;
                    pending.push(Piece::Text(")"));
                    for (i, arg) in args.iter().enumerate().rev() {
                        pending.push(Piece::Node(arg));
                        if i > 0 {
                            pending.push(Piece::Text(", "));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
