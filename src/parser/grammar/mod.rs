//! The shading-language grammar and its parse tables
//!
//! [`RULES`] lists the productions in production-id order. The LALR(1)
//! tables are derived from it once per process, on first use, and shared
//! read-only by every parse afterwards.

mod rules;

use std::sync::LazyLock;

pub use rules::RULES;

use super::ast::Node;
use super::errors::{GrammarError, ParseError};
use super::lr::ParseTables;
use super::terminals::Terminal;

/// Parse tables of the shading language
pub type GlslTables = ParseTables<Terminal, Node>;

static TABLES: LazyLock<Result<GlslTables, GrammarError>> = LazyLock::new(|| {
    let tables = GlslTables::build(RULES)?;
    tracing::debug!(
        productions = RULES.len(),
        states = tables.state_count(),
        conflicts = tables.conflicts().len(),
        "built shading-language parse tables"
    );
    Ok(tables)
});

/// The shared parse tables, built on first call
pub fn tables() -> Result<&'static GlslTables, ParseError> {
    TABLES
        .as_ref()
        .map_err(|error| ParseError::Grammar(error.clone()))
}
