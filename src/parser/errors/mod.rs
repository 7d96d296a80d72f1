//! Parser error handling module
//!
//! Every failure ends the parse. The variants of [`ParseError`] mirror where
//! the failure was detected:
//! - the token source ([`LexError`])
//! - the action table ([`SyntaxError`])
//! - the semantic actions ([`ReductionError`])
//!
//! Each error maps onto a categorized [`ErrorCode`].

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{
    GrammarError, LexError, LexErrorKind, ParseError, ReductionError, ReductionErrorKind,
    SyntaxError,
};
