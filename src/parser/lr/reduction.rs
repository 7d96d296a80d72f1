//! Stack symbols and typed access to a reduction body.

use text_size::TextSize;

use super::TerminalKind;
use crate::parser::errors::{ReductionError, ReductionErrorKind};
use crate::parser::token::Token;

/// One slot of the symbol stack
#[derive(Debug, Clone, PartialEq)]
pub enum ParserSymbol<T, N> {
    /// A shifted token
    Leaf(Token<T>),
    /// The result of a reduction
    Node(N),
}

/// Implemented by the node type of a language for diagnostics
pub trait SymbolNode {
    /// Name of the node's category, e.g. `expression`
    fn kind_name(&self) -> &'static str;
}

impl<T: TerminalKind, N: SymbolNode> ParserSymbol<T, N> {
    fn describe(&self) -> String {
        match self {
            Self::Leaf(token) => format!("token {}", token.terminal.grammar_name()),
            Self::Node(node) => format!("node {}", node.kind_name()),
        }
    }
}

/// Typed extraction of a payload from a language's node type
///
/// On mismatch the node is handed back untouched.
pub trait Extract<N>: Sized {
    /// Name reported when the node is of another kind
    const EXPECTED: &'static str;

    fn extract(node: N) -> Result<Self, N>;
}

/// The symbols a production spans, popped off the stack in body order
///
/// Every accessor checks the kind of the symbol it takes; a mismatch is a
/// [`ReductionError`] that aborts the parse.
#[derive(Debug)]
pub struct Body<T, N> {
    production: usize,
    head: &'static str,
    symbols: Vec<Option<ParserSymbol<T, N>>>,
    anchor: TextSize,
}

impl<T: TerminalKind, N: SymbolNode> Body<T, N> {
    /// `lookahead` is where the next token starts; it anchors synthesized
    /// tokens when the body holds no token of its own.
    pub fn new(
        production: usize,
        head: &'static str,
        symbols: Vec<ParserSymbol<T, N>>,
        lookahead: TextSize,
    ) -> Self {
        let anchor = symbols
            .iter()
            .rev()
            .find_map(|symbol| match symbol {
                ParserSymbol::Leaf(token) => Some(token.range.start()),
                ParserSymbol::Node(_) => None,
            })
            .unwrap_or(lookahead);
        Self {
            production,
            head,
            symbols: symbols.into_iter().map(Some).collect(),
            anchor,
        }
    }

    /// Start of the last token in the body
    pub fn anchor(&self) -> TextSize {
        self.anchor
    }

    pub fn error(&self, kind: ReductionErrorKind) -> ReductionError {
        ReductionError {
            production: self.production,
            head: self.head,
            kind,
        }
    }

    /// Take the symbol at `position`, whatever it is
    pub fn take(&mut self, position: usize) -> Result<ParserSymbol<T, N>, ReductionError> {
        self.symbols
            .get_mut(position)
            .and_then(Option::take)
            .ok_or_else(|| self.error(ReductionErrorKind::Missing { position }))
    }

    /// Take the token shifted at `position`
    pub fn token(&mut self, position: usize) -> Result<Token<T>, ReductionError> {
        match self.take(position)? {
            ParserSymbol::Leaf(token) => Ok(token),
            other => Err(self.mismatch(position, "token", &other)),
        }
    }

    /// Take the node reduced at `position` as an `X`
    pub fn node<X: Extract<N>>(&mut self, position: usize) -> Result<X, ReductionError> {
        match self.take(position)? {
            ParserSymbol::Node(node) => X::extract(node).map_err(|node| {
                self.mismatch(position, X::EXPECTED, &ParserSymbol::<T, N>::Node(node))
            }),
            other => Err(self.mismatch(position, X::EXPECTED, &other)),
        }
    }

    fn mismatch(
        &self,
        position: usize,
        expected: &'static str,
        found: &ParserSymbol<T, N>,
    ) -> ReductionError {
        self.error(ReductionErrorKind::Mismatch {
            position,
            expected,
            found: found.describe(),
        })
    }
}
