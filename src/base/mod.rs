//! Foundation types for the shading-language front end.
//!
//! This module provides the primitives shared by the lexer, the parser and
//! the diagnostics:
//! - [`TextRange`], [`TextSize`] - Byte offsets into the source text
//! - [`LineIndex`] - Byte offset to line/column conversion
//! - [`Position`], [`Span`] - Line/column positions for presentation
//!
//! This module has NO dependencies on other modules of this crate.

mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
