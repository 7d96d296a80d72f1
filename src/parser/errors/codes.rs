//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Syntax errors (rejected by the action table)
//! - E03xx: Construction errors (semantic actions, stack bookkeeping)
//! - E09xx: Input/output and internal errors

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated block comment or block annotation
    E0102,
    /// Invalid numeric literal
    E0103,
    /// Unterminated string or character literal
    E0104,
    /// Malformed or unsupported preprocessor directive
    E0105,
    /// Conditional group left open at end of input
    E0106,
    /// `#error` directive reached
    E0107,

    // =========================================================================
    // E02xx: Syntax errors
    // =========================================================================
    /// Token not permitted at this position
    E0201,
    /// Input ended while a construct was still open
    E0202,
    /// Reserved keyword used
    E0203,

    // =========================================================================
    // E03xx: Construction errors
    // =========================================================================
    /// A reduction body held a symbol of the wrong kind
    E0301,
    /// A semantic action left the symbol stack at the wrong depth
    E0302,
    /// The goto table has no entry for a completed production
    E0303,
    /// The parser was stepped again after an error
    E0304,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Reading the input failed
    E0901,
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0105 => "E0105",
            Self::E0106 => "E0106",
            Self::E0107 => "E0107",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0901 => "E0901",
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101
            | Self::E0102
            | Self::E0103
            | Self::E0104
            | Self::E0105
            | Self::E0106
            | Self::E0107 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 => "syntax error",
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 => "construction error",
            Self::E0901 => "input error",
            Self::E0999 => "internal error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated block comment",
            Self::E0103 => "invalid numeric literal",
            Self::E0104 => "unterminated literal",
            Self::E0105 => "invalid preprocessor directive",
            Self::E0106 => "unterminated conditional directive",
            Self::E0107 => "#error directive",
            Self::E0201 => "unexpected token",
            Self::E0202 => "unexpected end of input",
            Self::E0203 => "reserved keyword",
            Self::E0301 => "reduction body mismatch",
            Self::E0302 => "symbol stack out of sync",
            Self::E0303 => "missing goto entry",
            Self::E0304 => "parser already failed",
            Self::E0901 => "failed to read input",
            Self::E0999 => "internal parser error",
        }
    }

    /// Check if the error was caused by the input text rather than the parser
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::E0101
                | Self::E0102
                | Self::E0103
                | Self::E0104
                | Self::E0105
                | Self::E0106
                | Self::E0107
                | Self::E0201
                | Self::E0202
                | Self::E0203
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::E0201.as_str(), "E0201");
        assert_eq!(ErrorCode::E0999.as_str(), "E0999");
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(format!("{}", ErrorCode::E0301), "E0301");
    }

    #[test]
    fn test_error_code_default_message() {
        assert_eq!(ErrorCode::E0201.default_message(), "unexpected token");
        assert_eq!(ErrorCode::E0102.default_message(), "unterminated block comment");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::E0101.category_description(), "lexical error");
        assert_eq!(ErrorCode::E0106.category_description(), "lexical error");
        assert_eq!(ErrorCode::E0203.category_description(), "syntax error");
        assert_eq!(ErrorCode::E0302.category_description(), "construction error");
    }

    #[test]
    fn test_is_input_error() {
        assert!(ErrorCode::E0103.is_input_error());
        assert!(ErrorCode::E0202.is_input_error());
        assert!(!ErrorCode::E0301.is_input_error());
        assert!(!ErrorCode::E0901.is_input_error());
    }
}
