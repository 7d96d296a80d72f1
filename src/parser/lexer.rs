//! Logos-based lexer for the shading language
//!
//! Fast tokenization using the logos crate. Logos splits the input into raw
//! tokens; [`Lexer`] runs `#` lines through the preprocessor, expands
//! macros, drops tokens of skipped conditional groups, and then classifies
//! identifiers (keywords, type names, field selections), decodes numeric
//! literals and decides whether an annotation is leading or trailing.

use std::collections::VecDeque;

use logos::{Filter, FilterResult, Logos};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::errors::{LexError, LexErrorKind};
use super::options::ParseOptions;
use super::preprocessor::{Directive, Preprocessor};
use super::terminals::Terminal;
use super::token::{Token, TokenSource, TokenValue};

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    source: &'a str,
    type_names: FxHashSet<SmolStr>,
    preprocessor: Preprocessor,
    /// Expanded macro tokens not yet handed out, each with the range of
    /// the macro name
    pending: VecDeque<(LogosToken, SmolStr, TextRange)>,
    previous: Option<Terminal>,
    previous_end: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, &ParseOptions::default())
    }

    pub fn with_options(input: &'a str, options: &ParseOptions) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            source: input,
            type_names: options.initial_type_names().collect(),
            preprocessor: Preprocessor::new(options),
            pending: VecDeque::new(),
            previous: None,
            previous_end: 0,
        }
    }

    /// Make `name` lex as `TYPE-NAME` from now on.
    pub fn add_type_name(&mut self, name: impl Into<SmolStr>) {
        self.type_names.insert(name.into());
    }

    /// Pass-through directives seen so far
    pub fn into_directives(self) -> Vec<Directive> {
        self.preprocessor.into_directives()
    }

    fn scan(&mut self) -> Result<Option<Token>, LexError> {
        if let Some((raw, text, range)) = self.pending.pop_front() {
            return self.classify(raw, &text, range);
        }

        let Some(result) = self.inner.next() else {
            self.preprocessor.finish()?;
            return Ok(Some(Token::end(TextSize::of(self.source))));
        };
        let span = self.inner.span();
        let range = TextRange::new(
            TextSize::new(span.start as u32),
            TextSize::new(span.end as u32),
        );
        let text = self.inner.slice();
        let active = self.preprocessor.is_active();
        let raw = match result {
            Ok(raw) => raw,
            Err(_) if !active => return Ok(None),
            Err(kind) => return Err(LexError::new(kind, range, text)),
        };

        match raw {
            LogosToken::Directive if !self.starts_line(span.start) => {
                if !active {
                    return Ok(None);
                }
                return Err(LexError::new(
                    LexErrorKind::InvalidCharacter,
                    TextRange::at(range.start(), TextSize::new(1)),
                    "#",
                ));
            }
            LogosToken::Directive => {
                self.preprocessor.directive(text, range)?;
                return Ok(None);
            }
            _ if !active => return Ok(None),
            LogosToken::Ident => {
                if let Some(expansion) = self.preprocessor.expand(text, range)? {
                    self.pending.extend(
                        expansion
                            .into_iter()
                            .map(|(raw, text)| (raw, text, range)),
                    );
                    return Ok(None);
                }
            }
            _ => {}
        }
        self.classify(raw, text, range)
    }

    /// Turn one raw token into a parser token; `None` for blank
    /// annotations.
    fn classify(
        &mut self,
        raw: LogosToken,
        text: &str,
        range: TextRange,
    ) -> Result<Option<Token>, LexError> {
        let token = match raw {
            LogosToken::LineAnnotation => {
                let Some(body) = annotation_text(text, "//$", "") else {
                    return Ok(None);
                };
                let start = u32::from(range.start()) as usize;
                let terminal = if self.follows_semicolon_on_same_line(start) {
                    Terminal::TrailingAnnotation
                } else {
                    Terminal::LeadingAnnotation
                };
                Token::new(terminal, TokenValue::Annotation(body), range)
            }
            LogosToken::BlockAnnotation => {
                let Some(body) = annotation_text(text, "/*$", "*/") else {
                    return Ok(None);
                };
                Token::new(
                    Terminal::LeadingAnnotation,
                    TokenValue::Annotation(body),
                    range,
                )
            }
            LogosToken::Ident => self.identifier(text, range),
            LogosToken::Float => float_constant(text, range)?,
            LogosToken::DecimalInt | LogosToken::HexInt => int_constant(text, range)?,
            punctuation => match punctuation.terminal() {
                Some(terminal) => Token::bare(terminal, range),
                None => {
                    return Err(LexError::new(
                        LexErrorKind::InvalidCharacter,
                        range,
                        text,
                    ));
                }
            },
        };
        Ok(Some(token))
    }

    /// Only blanks precede `offset` on its line.
    fn starts_line(&self, offset: usize) -> bool {
        self.source
            .get(..offset)
            .map(|before| before.rsplit('\n').next().unwrap_or(""))
            .is_some_and(|line| line.chars().all(|c| c == ' ' || c == '\t'))
    }

    fn follows_semicolon_on_same_line(&self, start: usize) -> bool {
        self.previous == Some(Terminal::Semicolon)
            && !self
                .source
                .get(self.previous_end..start)
                .is_some_and(|gap| gap.contains('\n'))
    }

    fn identifier(&mut self, text: &str, range: TextRange) -> Token {
        if let Some(terminal) = Terminal::keyword(text) {
            let value = if terminal == Terminal::ReservedKeyword {
                TokenValue::Identifier(text.into())
            } else {
                TokenValue::None
            };
            return Token::new(terminal, value, range);
        }
        if self.type_names.contains(text) {
            return Token::new(
                Terminal::TypeName,
                TokenValue::Identifier(text.into()),
                range,
            );
        }

        let terminal = match self.previous {
            Some(Terminal::Dot) => Terminal::FieldSelection,
            Some(Terminal::Struct) => {
                self.add_type_name(text);
                Terminal::Identifier
            }
            _ => Terminal::Identifier,
        };
        Token::new(terminal, TokenValue::Identifier(text.into()), range)
    }
}

impl TokenSource<Terminal> for Lexer<'_> {
    fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            if let Some(token) = self.scan()? {
                self.previous = Some(token.terminal);
                self.previous_end = u32::from(token.range.end()) as usize;
                if token.is_end() {
                    tracing::trace!(offset = self.previous_end, "end of input");
                }
                return Ok(token);
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    /// Yields every token up to, but not including, the end marker.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) if token.is_end() => None,
            other => Some(other),
        }
    }
}

/// Tokenize an entire string, without the end marker
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).collect()
}

/// Annotation text between the delimiters, `None` when blank
fn annotation_text(text: &str, open: &str, close: &str) -> Option<SmolStr> {
    let inner = text.strip_prefix(open)?;
    let inner = inner.strip_suffix(close).unwrap_or(inner);
    let inner = inner.trim();
    (!inner.is_empty()).then(|| SmolStr::new(inner))
}

fn float_constant(text: &str, range: TextRange) -> Result<Token, LexError> {
    let digits = text.trim_end_matches(['f', 'F']);
    digits
        .parse::<f64>()
        .map(|value| Token::new(Terminal::FloatConstant, TokenValue::Float(value), range))
        .map_err(|_| LexError::new(LexErrorKind::InvalidNumber, range, text))
}

/// Decode a decimal, octal (leading `0`) or hexadecimal literal.
///
/// Values must fit in 32 bits; a `u`/`U` suffix makes the literal unsigned.
fn int_constant(text: &str, range: TextRange) -> Result<Token, LexError> {
    let invalid = || LexError::new(LexErrorKind::InvalidNumber, range, text);
    let (digits, unsigned) = match text.strip_suffix(['u', 'U']) {
        Some(digits) => (digits, true),
        None => (text, false),
    };

    let value = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)
    } else if digits.len() > 1 && digits.starts_with('0') {
        u64::from_str_radix(&digits[1..], 8)
    } else {
        digits.parse::<u64>()
    }
    .map_err(|_| invalid())?;

    if value > u64::from(u32::MAX) {
        return Err(invalid());
    }
    Ok(if unsigned {
        Token::new(Terminal::UintConstant, TokenValue::Uint(value), range)
    } else {
        Token::new(Terminal::IntConstant, TokenValue::Int(value as i64), range)
    })
}

fn line_comment(lex: &mut logos::Lexer<LogosToken>) -> Filter<()> {
    let rest = lex.remainder();
    lex.bump(rest.find('\n').unwrap_or(rest.len()));
    if lex.slice().starts_with("//$") {
        Filter::Emit(())
    } else {
        Filter::Skip
    }
}

fn block_comment(lex: &mut logos::Lexer<LogosToken>) -> FilterResult<(), LexErrorKind> {
    let rest = lex.remainder();
    match rest.find("*/") {
        Some(close) => {
            lex.bump(close + 2);
            if lex.slice().starts_with("/*$") {
                FilterResult::Emit(())
            } else {
                FilterResult::Skip
            }
        }
        None => {
            lex.bump(rest.len());
            FilterResult::Error(LexErrorKind::UnterminatedComment)
        }
    }
}

fn directive_line(lex: &mut logos::Lexer<LogosToken>) {
    let bytes = lex.remainder().as_bytes();
    let mut len = 0;
    while let Some(&byte) = bytes.get(len) {
        match (byte, bytes.get(len + 1).copied(), bytes.get(len + 2).copied()) {
            (b'\n', _, _) => break,
            (b'\\', Some(b'\n'), _) => len += 2,
            (b'\\', Some(b'\r'), Some(b'\n')) => len += 3,
            _ => len += 1,
        }
    }
    lex.bump(len);
}

/// Logos token enum - maps to Terminal
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(error = LexErrorKind)]
pub enum LogosToken {
    // =========================================================================
    // COMMENTS AND ANNOTATIONS (plain comments are skipped by the callbacks)
    // =========================================================================
    #[token("//", line_comment)]
    LineAnnotation,

    #[token("/*", block_comment)]
    BlockAnnotation,

    /// A `#` and the rest of its line, continuations included
    #[token("#", directive_line)]
    Directive,

    // =========================================================================
    // IDENTIFIERS AND LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?[fF]?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fF]?")]
    Float,

    #[regex(r"[0-9]+[uU]?")]
    DecimalInt,

    #[regex(r"0[xX][0-9a-fA-F]+[uU]?")]
    HexInt,

    // =========================================================================
    // PUNCTUATION AND OPERATORS
    // =========================================================================
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("=")]
    Equal,
    #[token(";")]
    Semicolon,
    #[token("!")]
    Bang,
    #[token("-")]
    Dash,
    #[token("~")]
    Tilde,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<")]
    LeftAngle,
    #[token(">")]
    RightAngle,
    #[token("|")]
    VerticalBar,
    #[token("^")]
    Caret,
    #[token("&")]
    Ampersand,
    #[token("?")]
    Question,
    #[token("++")]
    IncOp,
    #[token("--")]
    DecOp,
    #[token("<=")]
    LeOp,
    #[token(">=")]
    GeOp,
    #[token("==")]
    EqOp,
    #[token("!=")]
    NeOp,
    #[token("&&")]
    AndOp,
    #[token("||")]
    OrOp,
    #[token("^^")]
    XorOp,
    #[token("<<")]
    LeftOp,
    #[token(">>")]
    RightOp,
    #[token("*=")]
    MulAssign,
    #[token("/=")]
    DivAssign,
    #[token("%=")]
    ModAssign,
    #[token("+=")]
    AddAssign,
    #[token("-=")]
    SubAssign,
    #[token("<<=")]
    LeftAssign,
    #[token(">>=")]
    RightAssign,
    #[token("&=")]
    AndAssign,
    #[token("^=")]
    XorAssign,
    #[token("|=")]
    OrAssign,
}

impl LogosToken {
    /// The terminal of a punctuation token; `None` for tokens that need
    /// further classification.
    fn terminal(self) -> Option<Terminal> {
        use LogosToken::*;
        let terminal = match self {
            LeftParen => Terminal::LeftParen,
            RightParen => Terminal::RightParen,
            LeftBracket => Terminal::LeftBracket,
            RightBracket => Terminal::RightBracket,
            LeftBrace => Terminal::LeftBrace,
            RightBrace => Terminal::RightBrace,
            Dot => Terminal::Dot,
            Comma => Terminal::Comma,
            Colon => Terminal::Colon,
            Equal => Terminal::Equal,
            Semicolon => Terminal::Semicolon,
            Bang => Terminal::Bang,
            Dash => Terminal::Dash,
            Tilde => Terminal::Tilde,
            Plus => Terminal::Plus,
            Star => Terminal::Star,
            Slash => Terminal::Slash,
            Percent => Terminal::Percent,
            LeftAngle => Terminal::LeftAngle,
            RightAngle => Terminal::RightAngle,
            VerticalBar => Terminal::VerticalBar,
            Caret => Terminal::Caret,
            Ampersand => Terminal::Ampersand,
            Question => Terminal::Question,
            IncOp => Terminal::IncOp,
            DecOp => Terminal::DecOp,
            LeOp => Terminal::LeOp,
            GeOp => Terminal::GeOp,
            EqOp => Terminal::EqOp,
            NeOp => Terminal::NeOp,
            AndOp => Terminal::AndOp,
            OrOp => Terminal::OrOp,
            XorOp => Terminal::XorOp,
            LeftOp => Terminal::LeftOp,
            RightOp => Terminal::RightOp,
            MulAssign => Terminal::MulAssign,
            DivAssign => Terminal::DivAssign,
            ModAssign => Terminal::ModAssign,
            AddAssign => Terminal::AddAssign,
            SubAssign => Terminal::SubAssign,
            LeftAssign => Terminal::LeftAssign,
            RightAssign => Terminal::RightAssign,
            AndAssign => Terminal::AndAssign,
            XorAssign => Terminal::XorAssign,
            OrAssign => Terminal::OrAssign,
            LineAnnotation | BlockAnnotation | Directive | Ident | Float | DecimalInt | HexInt => {
                return None;
            }
        };
        Some(terminal)
    }
}
