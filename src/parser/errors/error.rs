//! Parse error types
//!
//! Provides structured error information including:
//! - Error codes for categorization
//! - Source ranges for lexical and syntax errors
//! - The automaton state and offending terminal for syntax errors
//! - The production and body position for construction failures

use std::path::PathBuf;

use smol_str::SmolStr;
use text_size::TextRange;
use thiserror::Error;

use super::codes::ErrorCode;
use crate::base::{LineIndex, Position};

/// What went wrong while scanning
///
/// Doubles as the logos error type, hence `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LexErrorKind {
    #[default]
    InvalidCharacter,
    UnterminatedComment,
    InvalidNumber,
    UnterminatedLiteral,
    /// Malformed, unsupported or unbalanced preprocessor directive
    InvalidDirective,
    /// `#if` without a matching `#endif`
    UnterminatedConditional,
    /// `#error` in an active group
    ErrorDirective,
}

impl LexErrorKind {
    pub fn code(self) -> ErrorCode {
        match self {
            Self::InvalidCharacter => ErrorCode::E0101,
            Self::UnterminatedComment => ErrorCode::E0102,
            Self::InvalidNumber => ErrorCode::E0103,
            Self::UnterminatedLiteral => ErrorCode::E0104,
            Self::InvalidDirective => ErrorCode::E0105,
            Self::UnterminatedConditional => ErrorCode::E0106,
            Self::ErrorDirective => ErrorCode::E0107,
        }
    }
}

/// A lexical error raised by a token source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {text:?}", .kind.code().default_message())]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Offending source range
    pub range: TextRange,
    /// Offending source text
    pub text: SmolStr,
}

impl LexError {
    pub fn new(kind: LexErrorKind, range: TextRange, text: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            range,
            text: text.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }
}

/// The action table has no entry for the current state and lookahead
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected {found}{}", format_expected(.expected))]
pub struct SyntaxError {
    /// Automaton state at the time of the error
    pub state: usize,
    /// Id of the offending terminal (the concrete id, before wildcard lookup)
    pub terminal: u16,
    /// Grammar name of the offending terminal
    pub found: &'static str,
    /// Source range of the offending token
    pub range: TextRange,
    /// Terminals that would have been accepted in this state
    pub expected: Vec<&'static str>,
}

impl SyntaxError {
    pub fn code(&self) -> ErrorCode {
        match self.found {
            "$END$" => ErrorCode::E0202,
            "RESERVED-KEYWORD" => ErrorCode::E0203,
            _ => ErrorCode::E0201,
        }
    }

    /// Check if the input ended too early
    pub fn is_unexpected_end(&self) -> bool {
        self.code() == ErrorCode::E0202
    }
}

fn format_expected(expected: &[&'static str]) -> String {
    match expected {
        [] => String::new(),
        [only] => format!(", expected {only}"),
        _ => format!(", expected one of {}", expected.join(" ")),
    }
}

/// Why a semantic action could not build its node
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReductionErrorKind {
    /// A body symbol is not of the kind the production expects
    #[error("body symbol {position} is {found}, expected {expected}")]
    Mismatch {
        position: usize,
        expected: &'static str,
        found: String,
    },
    /// A body symbol was already taken or never present
    #[error("body symbol {position} is missing")]
    Missing { position: usize },
    /// The action left the symbol stack at the wrong depth
    #[error("symbol stack has {actual} entries, expected {expected}")]
    StackDepth { expected: usize, actual: usize },
}

/// A semantic action failed; the parse is abandoned
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot reduce production {production} ({head}): {kind}")]
pub struct ReductionError {
    pub production: usize,
    /// Head nonterminal of the production
    pub head: &'static str,
    pub kind: ReductionErrorKind,
}

impl ReductionError {
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ReductionErrorKind::Mismatch { .. } | ReductionErrorKind::Missing { .. } => {
                ErrorCode::E0301
            }
            ReductionErrorKind::StackDepth { .. } => ErrorCode::E0302,
        }
    }
}

/// The rules of a language cannot be turned into tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("grammar has no rules")]
    Empty,
    #[error("production {production} ({head}) uses unknown symbol {symbol:?}")]
    UnknownSymbol {
        production: usize,
        head: &'static str,
        symbol: &'static str,
    },
    #[error("production {production} ({head}) keeps its child but has {len} body symbols")]
    KeepArity {
        production: usize,
        head: &'static str,
        len: usize,
    },
}

/// Any error that ends a parse
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("{0}")]
    Reduction(#[from] ReductionError),
    #[error("no goto from state {state} on {nonterminal}")]
    MissingGoto {
        state: usize,
        nonterminal: &'static str,
    },
    #[error("parser stopped after an earlier error")]
    Halted,
    #[error("invalid grammar: {0}")]
    Grammar(#[from] GrammarError),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Lex(error) => error.code(),
            Self::Syntax(error) => error.code(),
            Self::Reduction(error) => error.code(),
            Self::MissingGoto { .. } => ErrorCode::E0303,
            Self::Halted => ErrorCode::E0304,
            Self::Grammar(_) => ErrorCode::E0999,
            Self::Io { .. } => ErrorCode::E0901,
        }
    }

    /// Source range of the offending input, if the error has one
    pub fn range(&self) -> Option<TextRange> {
        match self {
            Self::Lex(error) => Some(error.range),
            Self::Syntax(error) => Some(error.range),
            _ => None,
        }
    }

    /// Line/column of the offending input
    pub fn position(&self, index: &LineIndex) -> Option<Position> {
        self.range().map(|range| index.position(range.start()))
    }

    /// One-line rendering: `line:col: error[E0201]: message`
    pub fn render(&self, index: &LineIndex) -> String {
        match self.position(index) {
            Some(position) => format!("{position}: error[{}]: {self}", self.code()),
            None => format!("error[{}]: {self}", self.code()),
        }
    }
}
