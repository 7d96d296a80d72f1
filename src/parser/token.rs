//! Tokens and the pull-based token source consumed by the parser.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::errors::LexError;
use super::lr::TerminalKind;
use super::terminals::Terminal;

/// Payload carried by a token
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TokenValue {
    #[default]
    None,
    /// Identifier, type name or field selection text
    Identifier(SmolStr),
    Int(i64),
    Uint(u64),
    Float(f64),
    /// Annotation text without its `//$` or `/*$ */` delimiters
    Annotation(SmolStr),
    /// String or character literal contents, without quotes
    Text(SmolStr),
}

/// A lexed token. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<T = Terminal> {
    /// Concrete terminal; never the wildcard.
    pub terminal: T,
    pub value: TokenValue,
    pub range: TextRange,
}

impl<T: TerminalKind> Token<T> {
    pub fn new(terminal: T, value: TokenValue, range: TextRange) -> Self {
        Self {
            terminal,
            value,
            range,
        }
    }

    /// A token without payload
    pub fn bare(terminal: T, range: TextRange) -> Self {
        Self::new(terminal, TokenValue::None, range)
    }

    /// The end-of-input marker at `offset`
    pub fn end(offset: TextSize) -> Self {
        Self::bare(T::END, TextRange::empty(offset))
    }

    pub fn is_end(&self) -> bool {
        self.terminal == T::END
    }

    /// Identifier-like text, if the token carries any
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Identifier(text)
            | TokenValue::Annotation(text)
            | TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Token<Terminal> {
    pub fn identifier(name: impl Into<SmolStr>, range: TextRange) -> Self {
        Self::new(
            Terminal::Identifier,
            TokenValue::Identifier(name.into()),
            range,
        )
    }

    /// Placeholder identifier for declarations that name no variable
    ///
    /// It has empty text and an empty range at `at`.
    pub fn anonymous_identifier(at: TextSize) -> Self {
        Self::identifier("", TextRange::empty(at))
    }

    pub fn is_anonymous(&self) -> bool {
        self.terminal == Terminal::Identifier && self.text() == Some("") && self.range.is_empty()
    }
}

/// A finite, non-restartable sequence of tokens ending in the end marker
///
/// Once the end marker has been returned, every further call returns it
/// again.
pub trait TokenSource<T: TerminalKind = Terminal> {
    fn next_token(&mut self) -> Result<Token<T>, LexError>;
}

impl<T: TerminalKind, S: TokenSource<T> + ?Sized> TokenSource<T> for &mut S {
    fn next_token(&mut self) -> Result<Token<T>, LexError> {
        (**self).next_token()
    }
}

/// Adapts an iterator of already-lexed tokens into a [`TokenSource`]
///
/// An end marker is appended after the last token unless the iterator
/// produces one itself.
#[derive(Debug)]
pub struct TokenStream<I> {
    tokens: I,
    last_offset: TextSize,
    finished: bool,
}

impl<I> TokenStream<I> {
    pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            last_offset: TextSize::new(0),
            finished: false,
        }
    }
}

impl<T: TerminalKind, I: Iterator<Item = Token<T>>> TokenSource<T> for TokenStream<I> {
    fn next_token(&mut self) -> Result<Token<T>, LexError> {
        if self.finished {
            return Ok(Token::end(self.last_offset));
        }
        match self.tokens.next() {
            Some(token) => {
                self.last_offset = token.range.end();
                if token.is_end() {
                    self.finished = true;
                }
                Ok(token)
            }
            None => {
                self.finished = true;
                Ok(Token::end(self.last_offset))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    #[test]
    fn test_stream_appends_end_and_repeats_it() {
        let mut stream = TokenStream::new(vec![
            Token::identifier("x", at(0, 1)),
            Token::bare(Terminal::Semicolon, at(1, 2)),
        ]);
        assert_eq!(stream.next_token().unwrap().terminal, Terminal::Identifier);
        assert_eq!(stream.next_token().unwrap().terminal, Terminal::Semicolon);
        let end = stream.next_token().unwrap();
        assert!(end.is_end());
        assert_eq!(end.range, TextRange::empty(TextSize::new(2)));
        assert!(stream.next_token().unwrap().is_end());
    }

    #[test]
    fn test_anonymous_identifier() {
        let token = Token::anonymous_identifier(TextSize::new(7));
        assert!(token.is_anonymous());
        assert_eq!(token.text(), Some(""));
        assert!(!Token::identifier("x", at(0, 1)).is_anonymous());
    }
}
