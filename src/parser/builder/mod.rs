//! Semantic actions of the shading-language grammar.
//!
//! Each function builds the node for one production (or one family of
//! productions with the same shape) from the popped body. Positions passed
//! to [`Body`] accessors are body positions of that production; the rule
//! table in [`crate::parser::grammar`] pairs every production with its
//! function.

pub(crate) mod declarations;
pub(crate) mod expressions;
pub(crate) mod statements;
pub(crate) mod types;

use super::ast::{ArraySize, Expr, Node};
use super::errors::{ReductionError, ReductionErrorKind};
use super::lr::Body;
use super::terminals::Terminal;
use super::token::Token;

pub(crate) type GlslBody = Body<Terminal, Node>;
pub(crate) type Built = Result<Node, ReductionError>;

/// A token whose terminal or payload does not fit the production
fn unexpected(
    body: &GlslBody,
    position: usize,
    expected: &'static str,
    token: &Token,
) -> ReductionError {
    body.error(ReductionErrorKind::Mismatch {
        position,
        expected,
        found: format!("token {}", token.terminal.grammar_name()),
    })
}

/// Shape of an optional array suffix in a production body
#[derive(Debug, Clone, Copy)]
enum Suffix {
    None,
    /// `[ ]`
    Unsized,
    /// `[ constant-expression ]`, expression at the given position
    Sized(usize),
}

fn array_suffix(
    body: &mut GlslBody,
    suffix: Suffix,
) -> Result<Option<ArraySize>, ReductionError> {
    Ok(match suffix {
        Suffix::None => None,
        Suffix::Unsized => Some(ArraySize::Unsized),
        Suffix::Sized(position) => {
            let size: Expr = body.node(position)?;
            Some(ArraySize::Sized(Box::new(size)))
        }
    })
}
