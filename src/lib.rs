//! # glsl-frontend
//!
//! Table-driven LALR(1) parser for the OpenGL shading language, producing a
//! strictly owned syntax tree.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! visit        → Visitor trait, shader interface inspection
//!   ↓
//! annotations  → Tag grammar for `//$` and `/*$ */` annotations
//!   ↓
//! parser       → Logos lexer, LR machinery, grammar, AST builders
//!   ↓
//! base         → Primitives (TextRange, LineIndex, Position)
//! ```
//!
//! ## Example
//!
//! ```
//! use glslfront::parse_str;
//!
//! let unit = parse_str("uniform vec3 color; void main() {}").unwrap();
//! assert_eq!(unit.len(), 2);
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → annotations → visit)
// ============================================================================

/// Foundation types: TextRange, LineIndex, Position
pub mod base;

/// Parser: Logos lexer, LR engine, grammar tables, AST
pub mod parser;

/// Annotation payloads parsed into tags
pub mod annotations;

/// AST traversal and shader interface inspection
pub mod visit;

// Re-export the entry points
pub use parser::{
    ParseError, ParseOptions, TranslationUnit, parse_file, parse_file_with, parse_many,
    parse_many_with, parse_str, parse_str_with, parse_tokens,
};

// Re-export foundation types
pub use base::{LineIndex, Position, Span, TextRange, TextSize};
