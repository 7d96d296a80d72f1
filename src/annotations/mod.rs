//! Declaration annotations
//!
//! An annotation attaches tags to a declaration:
//!
//! ```text
//! uniform float gain; //$ @name = "Gain", @range = [0.0, 2.0]
//! ```
//!
//! The text between the delimiters is parsed by a small grammar of its own,
//! driven by the same LR machinery as the shading language.

mod grammar;
mod lexer;

use smol_str::SmolStr;

pub use lexer::AnnotationLexer;

use crate::parser::errors::ParseError;
use crate::parser::lr::TerminalKind;

/// Terminals of the annotation language
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnnotationTerminal {
    LeftBracket,
    RightBracket,
    Equal,
    At,
    Comma,
    True,
    False,
    Identifier,
    IntConst,
    FloatConst,
    String,
    Character,
    End,
}

impl AnnotationTerminal {
    pub const ALL: &'static [AnnotationTerminal] = &[
        Self::LeftBracket,
        Self::RightBracket,
        Self::Equal,
        Self::At,
        Self::Comma,
        Self::True,
        Self::False,
        Self::Identifier,
        Self::IntConst,
        Self::FloatConst,
        Self::String,
        Self::Character,
        Self::End,
    ];
}

impl TerminalKind for AnnotationTerminal {
    const COUNT: usize = Self::ALL.len();
    const END: Self = Self::End;

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn grammar_name(self) -> &'static str {
        match self {
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Equal => "=",
            Self::At => "@",
            Self::Comma => ",",
            Self::True => "true",
            Self::False => "false",
            Self::Identifier => "IDENTIFIER",
            Self::IntConst => "INTCONST",
            Self::FloatConst => "FLOATCONST",
            Self::String => "STRING",
            Self::Character => "CHARACTER",
            Self::End => "$END$",
        }
    }
}

/// Value assigned to a tag
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(SmolStr),
    Char(char),
}

impl AnnotationValue {
    /// The value as a number, integers widened
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }
}

/// `@a = @b = value` or `@a = [v1, v2]`
///
/// Every name in `names` is assigned all of `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationTag {
    pub names: Vec<SmolStr>,
    pub values: Vec<AnnotationValue>,
}

impl AnnotationTag {
    pub fn has_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// The only value, if there is exactly one
    pub fn value(&self) -> Option<&AnnotationValue> {
        match self.values.as_slice() {
            [value] => Some(value),
            _ => None,
        }
    }
}

/// Find the first tag carrying `name`.
pub fn find_tag<'a>(tags: &'a [AnnotationTag], name: &str) -> Option<&'a AnnotationTag> {
    tags.iter().find(|tag| tag.has_name(name))
}

/// Parse the text of one annotation into its tags.
pub fn parse_annotation(text: &str) -> Result<Vec<AnnotationTag>, ParseError> {
    grammar::parse(AnnotationLexer::new(text))
}
