//! Logos-based lexer for annotation text

use logos::{FilterResult, Logos};
use text_size::{TextRange, TextSize};

use super::AnnotationTerminal;
use crate::parser::errors::{LexError, LexErrorKind};
use crate::parser::token::{Token, TokenSource, TokenValue};

/// Lexer over the text of one annotation
pub struct AnnotationLexer<'a> {
    inner: logos::Lexer<'a, AnnotationToken>,
    source: &'a str,
}

impl<'a> AnnotationLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: AnnotationToken::lexer(input),
            source: input,
        }
    }
}

impl TokenSource<AnnotationTerminal> for AnnotationLexer<'_> {
    fn next_token(&mut self) -> Result<Token<AnnotationTerminal>, LexError> {
        let Some(result) = self.inner.next() else {
            return Ok(Token::end(TextSize::of(self.source)));
        };
        let span = self.inner.span();
        let range = TextRange::new(
            TextSize::new(span.start as u32),
            TextSize::new(span.end as u32),
        );
        let text = self.inner.slice();
        let raw = result.map_err(|kind| LexError::new(kind, range, text))?;

        let (terminal, value) = match raw {
            AnnotationToken::LeftBracket => (AnnotationTerminal::LeftBracket, TokenValue::None),
            AnnotationToken::RightBracket => (AnnotationTerminal::RightBracket, TokenValue::None),
            AnnotationToken::Equal => (AnnotationTerminal::Equal, TokenValue::None),
            AnnotationToken::At => (AnnotationTerminal::At, TokenValue::None),
            AnnotationToken::Comma => (AnnotationTerminal::Comma, TokenValue::None),
            AnnotationToken::True => (AnnotationTerminal::True, TokenValue::None),
            AnnotationToken::False => (AnnotationTerminal::False, TokenValue::None),
            AnnotationToken::Ident => (
                AnnotationTerminal::Identifier,
                TokenValue::Identifier(text.into()),
            ),
            AnnotationToken::Int => {
                let value = text
                    .parse::<i64>()
                    .map_err(|_| LexError::new(LexErrorKind::InvalidNumber, range, text))?;
                (AnnotationTerminal::IntConst, TokenValue::Int(value))
            }
            AnnotationToken::Float => {
                let value = text
                    .trim_end_matches(['f', 'F'])
                    .parse::<f64>()
                    .map_err(|_| LexError::new(LexErrorKind::InvalidNumber, range, text))?;
                (AnnotationTerminal::FloatConst, TokenValue::Float(value))
            }
            AnnotationToken::StringLiteral => (
                AnnotationTerminal::String,
                TokenValue::Text(unquote(text, '"').into()),
            ),
            AnnotationToken::CharacterLiteral => (
                AnnotationTerminal::Character,
                TokenValue::Text(unquote(text, '\'').into()),
            ),
        };
        Ok(Token::new(terminal, value, range))
    }
}

fn unquote(text: &str, quote: char) -> &str {
    let inner = text.strip_prefix(quote).unwrap_or(text);
    inner.strip_suffix(quote).unwrap_or(inner)
}

/// Scans to the closing quote of a literal opened by the current token.
fn quoted(lex: &mut logos::Lexer<AnnotationToken>, quote: char) -> FilterResult<(), LexErrorKind> {
    let rest = lex.remainder();
    match rest.find([quote, '\n']) {
        Some(close) if rest[close..].starts_with(quote) => {
            lex.bump(close + 1);
            FilterResult::Emit(())
        }
        Some(newline) => {
            lex.bump(newline);
            FilterResult::Error(LexErrorKind::UnterminatedLiteral)
        }
        None => {
            lex.bump(rest.len());
            FilterResult::Error(LexErrorKind::UnterminatedLiteral)
        }
    }
}

fn string_literal(lex: &mut logos::Lexer<AnnotationToken>) -> FilterResult<(), LexErrorKind> {
    quoted(lex, '"')
}

fn character_literal(lex: &mut logos::Lexer<AnnotationToken>) -> FilterResult<(), LexErrorKind> {
    match quoted(lex, '\'') {
        FilterResult::Emit(()) if unquote(lex.slice(), '\'').chars().count() != 1 => {
            FilterResult::Error(LexErrorKind::InvalidCharacter)
        }
        other => other,
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(error = LexErrorKind)]
enum AnnotationToken {
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("=")]
    Equal,
    #[token("@")]
    At,
    #[token(",")]
    Comma,
    #[token("true")]
    True,
    #[token("false")]
    False,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"-?[0-9]+")]
    Int,

    #[regex(r"-?([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?[fF]?")]
    #[regex(r"-?[0-9]+[eE][+-]?[0-9]+[fF]?")]
    Float,

    #[token("\"", string_literal)]
    StringLiteral,

    #[token("'", character_literal)]
    CharacterLiteral,
}
