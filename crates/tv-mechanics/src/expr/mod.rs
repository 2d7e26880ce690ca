//! Arithmetic expressions for derived attribute formulas.
//!
//! The language is deliberately tiny: integer literals, attribute names,
//! `+ - * /`, unary minus and parentheses. Division floors, so
//! `(体型+体质)/10` gives the same result a player would compute by hand.

mod lexer;

pub use lexer::{Token, lex};

use std::fmt;

use chumsky::input::ValueInput;
use chumsky::prelude::*;

use crate::error::{MechError, MechResult};

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Floor division.
    Div,
}

/// A parsed arithmetic expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// An integer literal.
    Number(i64),
    /// A named attribute.
    Ref(String),
    /// Unary minus.
    Neg(Box<Expr>),
    /// A binary operation.
    Binary {
        /// The operator.
        op: BinOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Parse an expression from source text.
    pub fn parse(source: &str) -> MechResult<Self> {
        let tokens = lex(source)?;
        expr_parser()
            .then_ignore(end())
            .parse(tokens.as_slice())
            .into_result()
            .map_err(|errors| MechError::InvalidExpression {
                expr: source.to_string(),
                message: errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            })
    }

    fn binary(op: BinOp, lhs: Self, rhs: Self) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Every attribute name the expression refers to, in source order.
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_refs(&mut names);
        names
    }

    fn collect_refs<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Number(_) => {}
            Self::Ref(name) => names.push(name),
            Self::Neg(inner) => inner.collect_refs(names),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_refs(names);
                rhs.collect_refs(names);
            }
        }
    }

    /// Evaluate with `lookup` supplying attribute values.
    pub fn evaluate(&self, lookup: &dyn Fn(&str) -> Option<i64>) -> MechResult<i64> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Ref(name) => {
                lookup(name).ok_or_else(|| MechError::UnknownReference(name.clone()))
            }
            Self::Neg(inner) => Ok(inner.evaluate(lookup)?.saturating_neg()),
            Self::Binary { op, lhs, rhs } => {
                let a = lhs.evaluate(lookup)?;
                let b = rhs.evaluate(lookup)?;
                match op {
                    BinOp::Add => Ok(a.saturating_add(b)),
                    BinOp::Sub => Ok(a.saturating_sub(b)),
                    BinOp::Mul => Ok(a.saturating_mul(b)),
                    BinOp::Div => floor_div(a, b),
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Ref(name) => write!(f, "{name}"),
            Self::Neg(inner) => write!(f, "-{inner}"),
            Self::Binary { op, lhs, rhs } => {
                let symbol = match op {
                    BinOp::Add => "+",
                    BinOp::Sub => "-",
                    BinOp::Mul => "*",
                    BinOp::Div => "/",
                };
                write!(f, "({lhs}{symbol}{rhs})")
            }
        }
    }
}

/// Integer division rounding toward negative infinity.
pub fn floor_div(a: i64, b: i64) -> MechResult<i64> {
    if b == 0 {
        return Err(MechError::DivisionByZero);
    }
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// The formula grammar over lexed tokens.
///
/// `*` and `/` bind tighter than `+` and `-`, both left-associative;
/// unary minus binds tightest.
fn expr_parser<'a, I>() -> impl Parser<'a, I, Expr, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    recursive(|expr| {
        let operand = choice((
            select! { Token::Integer(n) => Expr::Number(n) },
            select! { Token::Name(name) => Expr::Ref(name) },
            expr.delimited_by(just(Token::LParen), just(Token::RParen)),
        ))
        .labelled("operand");

        let unary = just(Token::Minus)
            .repeated()
            .foldr(operand, |_, inner| Expr::Neg(Box::new(inner)));

        let product = unary.clone().foldl(
            choice((
                just(Token::Star).to(BinOp::Mul),
                just(Token::Slash).to(BinOp::Div),
            ))
            .then(unary)
            .repeated(),
            |lhs, (op, rhs)| Expr::binary(op, lhs, rhs),
        );

        product.clone().foldl(
            choice((
                just(Token::Plus).to(BinOp::Add),
                just(Token::Minus).to(BinOp::Sub),
            ))
            .then(product)
            .repeated(),
            |lhs, (op, rhs)| Expr::binary(op, lhs, rhs),
        )
    })
}
