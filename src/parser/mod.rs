//! Table-driven LALR(1) parser for the OpenGL shading language
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Preprocessor → directives, macro expansion, conditional groups
//!     ↓
//! Lexer (logos) → Tokens with a Terminal, a value and a byte range
//!     ↓
//! LR engine → shift / reduce / accept over shared parse tables
//!     ↓
//! Builders → one AST node per reduced production
//!     ↓
//! TranslationUnit
//! ```
//!
//! The tables are computed once from [`grammar::RULES`]. Native type
//! keywords all share the wildcard terminal `NATIVE-TYPE` for table
//! lookup while the tokens keep their concrete terminal, so the AST still
//! tells `vec3` from `mat4`.
//!
//! Any error is fatal: the first lexical, syntax or reduction error ends
//! the parse and no partial tree is returned.

pub mod ast;
mod builder;
pub mod errors;
pub mod grammar;
mod lexer;
pub mod lr;
mod options;
mod preprocessor;
pub mod terminals;
pub mod token;

use std::path::Path;

use rayon::prelude::*;

pub use ast::{Node, TranslationUnit};
pub use errors::{ErrorCode, ParseError};
pub use lexer::{Lexer, tokenize};
pub use options::ParseOptions;
pub use preprocessor::{Directive, DirectiveKind};
pub use terminals::Terminal;
pub use token::{Token, TokenSource, TokenStream, TokenValue};

use errors::{ReductionError, ReductionErrorKind};
use lr::{Extract, Parser, SymbolNode};

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Parse shader source with default options.
pub fn parse_str(source: &str) -> Result<TranslationUnit, ParseError> {
    parse_str_with(source, &ParseOptions::default())
}

/// Parse shader source.
pub fn parse_str_with(source: &str, options: &ParseOptions) -> Result<TranslationUnit, ParseError> {
    let tables = grammar::tables()?;
    let mut lexer = Lexer::with_options(source, options);
    let root = Parser::new(tables, &mut lexer)
        .with_trace(options.trace)
        .run()?;
    let mut unit = into_translation_unit(root)?;
    unit.directives = lexer.into_directives();
    Ok(unit)
}

/// Read and parse a shader file with default options.
pub fn parse_file(path: impl AsRef<Path>) -> Result<TranslationUnit, ParseError> {
    parse_file_with(path, &ParseOptions::default())
}

/// Read and parse a shader file.
pub fn parse_file_with(
    path: impl AsRef<Path>,
    options: &ParseOptions,
) -> Result<TranslationUnit, ParseError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "parsing shader file");
    parse_str_with(&source, options)
}

/// Parse a token sequence produced elsewhere.
///
/// The source must end in the end marker and keep returning it; see
/// [`TokenStream`] for wrapping a plain token list.
pub fn parse_tokens<S: TokenSource>(source: S) -> Result<TranslationUnit, ParseError> {
    let tables = grammar::tables()?;
    let root = Parser::new(tables, source).run()?;
    into_translation_unit(root)
}

/// Parse independent sources in parallel with default options.
pub fn parse_many(sources: &[&str]) -> Vec<Result<TranslationUnit, ParseError>> {
    parse_many_with(sources, &ParseOptions::default())
}

/// Parse independent sources in parallel.
///
/// Results are in input order. Every parse has its own lexer and stacks;
/// only the tables are shared.
pub fn parse_many_with(
    sources: &[&str],
    options: &ParseOptions,
) -> Vec<Result<TranslationUnit, ParseError>> {
    sources
        .par_iter()
        .map(|source| parse_str_with(source, options))
        .collect()
}

fn into_translation_unit(root: Node) -> Result<TranslationUnit, ParseError> {
    TranslationUnit::extract(root).map_err(|node| {
        ParseError::from(ReductionError {
            production: 0,
            head: "$START$",
            kind: ReductionErrorKind::Mismatch {
                position: 0,
                expected: TranslationUnit::EXPECTED,
                found: format!("node {}", node.kind_name()),
            },
        })
    })
}
