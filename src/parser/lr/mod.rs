//! Table-driven LR machinery
//!
//! A language is a static slice of [`Rule`]s. [`ParseTables::build`]
//! resolves the rules into a [`Grammar`] and computes LALR(1) action and
//! goto tables once; the tables are immutable afterwards and can be shared
//! by any number of concurrent [`Parser`]s.
//!
//! The machinery is generic over the terminal type so the same automaton
//! drives the shading language and the annotation language.

mod engine;
mod grammar;
mod lalr;
mod reduction;
mod tables;

pub use engine::{Parser, Step};
pub use grammar::{Grammar, Production, Rule, Semantic, Symbol, build, keep};
pub use reduction::{Body, Extract, ParserSymbol, SymbolNode};
pub use tables::{Action, Conflict, ParseTables, ProductionId, StateId};

use std::fmt::Debug;
use std::hash::Hash;

/// A terminal alphabet with dense ids `0..COUNT`
pub trait TerminalKind: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Number of terminal ids
    const COUNT: usize;
    /// The end-of-input marker
    const END: Self;

    fn index(self) -> usize;

    fn from_index(index: usize) -> Option<Self>;

    /// Symbol used for this terminal in production bodies
    fn grammar_name(self) -> &'static str;

    /// The terminal whose action-table column is consulted for `self`
    ///
    /// `None` marks an id no token source may produce; it never has an
    /// action.
    fn lookup(self) -> Option<Self> {
        Some(self)
    }
}

#[cfg(test)]
mod tests;
