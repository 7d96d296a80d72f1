//! Preprocessing directives
//!
//! The lexer hands every `#` line to [`Preprocessor`], which keeps the
//! macro table and the conditional-inclusion stack. Object-like macros are
//! expanded at token level, so expanded tokens keep the source range of the
//! name they replace and every diagnostic still points into the original
//! text.
//!
//! Supported: `#define NAME body`, `#undef`, `#ifdef`, `#ifndef`, `#if`,
//! `#elif`, `#else`, `#endif`, `#error`, and the pass-through directives
//! `#version`, `#extension`, `#pragma` and `#line`, which are recorded on
//! the translation unit. Function-like macros and `#include` are rejected.

use logos::Logos;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::TextRange;

use super::errors::{LexError, LexErrorKind};
use super::lexer::LogosToken;
use super::options::ParseOptions;

/// Value of `__VERSION__` until a `#version` directive says otherwise
const DEFAULT_VERSION: &str = "150";

/// A directive handed through to the consumer of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    /// The whole directive line
    pub range: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `#version 330 core`
    Version {
        number: u32,
        profile: Option<SmolStr>,
    },
    /// `#extension GL_ARB_foo : enable`
    Extension { name: SmolStr, behavior: SmolStr },
    /// `#pragma ...`, text after the directive name
    Pragma(SmolStr),
    /// `#line ...`, text after the directive name
    Line(SmolStr),
}

/// A token of a macro body or a directive line
pub(crate) type RawToken = (LogosToken, SmolStr);

/// One level of `#if`/`#ifdef`/`#ifndef` nesting
#[derive(Debug)]
struct Branch {
    /// Tokens of the current group are kept
    active: bool,
    /// Some group of this conditional was (or must be treated as) taken
    taken: bool,
    /// The enclosing group is active
    parent_active: bool,
    seen_else: bool,
    opened_at: TextRange,
}

#[derive(Debug)]
pub(crate) struct Preprocessor {
    macros: FxHashMap<SmolStr, SmolStr>,
    branches: Vec<Branch>,
    directives: Vec<Directive>,
}

impl Preprocessor {
    pub(crate) fn new(options: &ParseOptions) -> Self {
        let mut macros = FxHashMap::default();
        macros.insert(SmolStr::new("__VERSION__"), SmolStr::new(DEFAULT_VERSION));
        for (name, value) in &options.defines {
            macros.insert(name.clone(), value.clone());
        }
        Self {
            macros,
            branches: Vec::new(),
            directives: Vec::new(),
        }
    }

    /// Tokens outside a skipped conditional group are kept.
    pub(crate) fn is_active(&self) -> bool {
        self.branches.last().is_none_or(|branch| branch.active)
    }

    pub(crate) fn is_defined(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub(crate) fn into_directives(self) -> Vec<Directive> {
        self.directives
    }

    /// Check that every conditional was closed.
    pub(crate) fn finish(&self) -> Result<(), LexError> {
        match self.branches.last() {
            Some(branch) => Err(LexError::new(
                LexErrorKind::UnterminatedConditional,
                branch.opened_at,
                "#if",
            )),
            None => Ok(()),
        }
    }

    /// Expansion of `name`, or `None` when it is not a macro.
    ///
    /// Nested macros are expanded too; a macro is never expanded inside its
    /// own expansion.
    pub(crate) fn expand(
        &self,
        name: &str,
        range: TextRange,
    ) -> Result<Option<Vec<RawToken>>, LexError> {
        if !self.is_defined(name) {
            return Ok(None);
        }
        let mut out = Vec::new();
        let mut active = Vec::new();
        self.expand_into(name, range, &mut active, &mut out)?;
        Ok(Some(out))
    }

    fn expand_into(
        &self,
        name: &str,
        range: TextRange,
        active: &mut Vec<SmolStr>,
        out: &mut Vec<RawToken>,
    ) -> Result<(), LexError> {
        let body = match self.macros.get(name) {
            Some(body) if !active.iter().any(|open| open == name) => body,
            _ => {
                out.push((LogosToken::Ident, SmolStr::new(name)));
                return Ok(());
            }
        };
        let tokens = lex_line(body)
            .map_err(|kind| LexError::new(kind, range, body.clone()))?;
        active.push(SmolStr::new(name));
        for (raw, text) in tokens {
            if raw == LogosToken::Ident {
                self.expand_into(&text, range, active, out)?;
            } else {
                out.push((raw, text));
            }
        }
        active.pop();
        Ok(())
    }

    /// Process one directive line, `#` included.
    pub(crate) fn directive(&mut self, line: &str, range: TextRange) -> Result<(), LexError> {
        let invalid = || LexError::new(LexErrorKind::InvalidDirective, range, line);
        let text = join_continuations(line.strip_prefix('#').unwrap_or(line));
        let text = text.trim();
        let name_len = text
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(text.len());
        let (name, rest) = text.split_at(name_len);
        let rest = rest.trim();

        match name {
            "ifdef" | "ifndef" => {
                let defined = self.is_defined(macro_name(rest).ok_or_else(invalid)?);
                self.open(defined == (name == "ifdef"), range);
            }
            "if" => {
                let condition = if self.is_active() {
                    self.condition(rest).ok_or_else(invalid)?
                } else {
                    false
                };
                self.open(condition, range);
            }
            "elif" => {
                let evaluate = match self.branches.last() {
                    Some(branch) if !branch.seen_else => branch.parent_active && !branch.taken,
                    _ => return Err(invalid()),
                };
                let condition = evaluate && self.condition(rest).ok_or_else(invalid)?;
                if let Some(branch) = self.branches.last_mut() {
                    branch.active = condition;
                    branch.taken |= condition;
                }
            }
            "else" => match self.branches.last_mut() {
                Some(branch) if !branch.seen_else => {
                    branch.active = branch.parent_active && !branch.taken;
                    branch.taken = true;
                    branch.seen_else = true;
                }
                _ => return Err(invalid()),
            },
            "endif" => {
                self.branches.pop().ok_or_else(invalid)?;
            }
            _ if !self.is_active() => {}
            "" => {}
            "define" => {
                let defined = macro_name_prefix(rest).ok_or_else(invalid)?;
                let body = &rest[defined.len()..];
                if body.starts_with('(') {
                    return Err(invalid());
                }
                self.macros
                    .insert(SmolStr::new(defined), SmolStr::new(body.trim()));
            }
            "undef" => {
                self.macros.remove(macro_name(rest).ok_or_else(invalid)?);
            }
            "version" => {
                let mut words = rest.split_whitespace();
                let number: u32 = words
                    .next()
                    .and_then(|word| word.parse().ok())
                    .ok_or_else(invalid)?;
                let profile = words.next().map(SmolStr::new);
                if words.next().is_some() {
                    return Err(invalid());
                }
                self.macros
                    .insert(SmolStr::new("__VERSION__"), SmolStr::new(number.to_string()));
                self.record(DirectiveKind::Version { number, profile }, range);
            }
            "extension" => {
                let (name, behavior) = rest.split_once(':').ok_or_else(invalid)?;
                let name = macro_name(name.trim()).ok_or_else(invalid)?;
                let behavior = macro_name(behavior.trim()).ok_or_else(invalid)?;
                self.record(
                    DirectiveKind::Extension {
                        name: SmolStr::new(name),
                        behavior: SmolStr::new(behavior),
                    },
                    range,
                );
            }
            "pragma" => self.record(DirectiveKind::Pragma(SmolStr::new(rest)), range),
            "line" => self.record(DirectiveKind::Line(SmolStr::new(rest)), range),
            "error" => {
                return Err(LexError::new(LexErrorKind::ErrorDirective, range, rest));
            }
            _ => return Err(invalid()),
        }
        Ok(())
    }

    fn open(&mut self, condition: bool, range: TextRange) {
        let parent_active = self.is_active();
        self.branches.push(Branch {
            active: parent_active && condition,
            taken: !parent_active || condition,
            parent_active,
            seen_else: false,
            opened_at: range,
        });
    }

    fn record(&mut self, kind: DirectiveKind, range: TextRange) {
        tracing::trace!(?kind, "preprocessor directive");
        self.directives.push(Directive { kind, range });
    }

    /// Evaluate an `#if`/`#elif` expression; `None` when malformed.
    fn condition(&self, text: &str) -> Option<bool> {
        let tokens = lex_line(text).ok()?;
        let mut operands = Vec::with_capacity(tokens.len());
        let mut iter = tokens.into_iter().peekable();
        while let Some((raw, word)) = iter.next() {
            if raw == LogosToken::Ident && word == "defined" {
                let parenthesized = iter.next_if(|(raw, _)| *raw == LogosToken::LeftParen);
                let (raw, name) = iter.next()?;
                if raw != LogosToken::Ident {
                    return None;
                }
                if parenthesized.is_some() {
                    iter.next_if(|(raw, _)| *raw == LogosToken::RightParen)?;
                }
                operands.push(Operand::Number(i64::from(self.is_defined(&name))));
            } else if raw == LogosToken::Ident {
                let expansion = self.expand(&word, TextRange::default()).ok()?;
                match expansion {
                    Some(tokens) => {
                        for (raw, text) in tokens {
                            operands.push(Operand::from_raw(raw, &text)?);
                        }
                    }
                    None => operands.push(Operand::Number(0)),
                }
            } else {
                operands.push(Operand::from_raw(raw, &word)?);
            }
        }

        let mut evaluator = Evaluator {
            operands: &operands,
            position: 0,
        };
        let value = evaluator.expression(0)?;
        (evaluator.position == operands.len()).then_some(value != 0)
    }
}

/// Splice lines ending in a backslash.
fn join_continuations(text: &str) -> String {
    text.replace("\\\r\n", " ").replace("\\\n", " ")
}

/// `text` if it is exactly one identifier
fn macro_name(text: &str) -> Option<&str> {
    let name = macro_name_prefix(text)?;
    (name.len() == text.len()).then_some(name)
}

/// The identifier `text` starts with
fn macro_name_prefix(text: &str) -> Option<&str> {
    let len = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    let name = &text[..len];
    name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        .then_some(name)
}

/// Split a macro body or an expression into tokens. Comments and
/// annotations are dropped.
fn lex_line(text: &str) -> Result<Vec<RawToken>, LexErrorKind> {
    let mut lexer = LogosToken::lexer(text);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result? {
            LogosToken::LineAnnotation | LogosToken::BlockAnnotation => {}
            LogosToken::Directive => return Err(LexErrorKind::InvalidCharacter),
            raw => tokens.push((raw, SmolStr::new(lexer.slice()))),
        }
    }
    Ok(tokens)
}

/// A token of a conditional expression after macro expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Number(i64),
    Operator(LogosToken),
}

impl Operand {
    fn from_raw(raw: LogosToken, text: &str) -> Option<Self> {
        match raw {
            LogosToken::DecimalInt | LogosToken::HexInt => integer(text).map(Self::Number),
            // Identifiers left over from an expansion are undefined names.
            LogosToken::Ident => Some(Self::Number(0)),
            LogosToken::Float => None,
            operator => Some(Self::Operator(operator)),
        }
    }
}

fn integer(text: &str) -> Option<i64> {
    let digits = text.trim_end_matches(['u', 'U']);
    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).ok()
    } else {
        digits.parse().ok()
    }
}

/// Binding power of a binary operator, loosest first
fn precedence(operator: LogosToken) -> Option<u8> {
    use LogosToken::*;
    let level = match operator {
        OrOp => 1,
        AndOp => 2,
        VerticalBar => 3,
        Caret => 4,
        Ampersand => 5,
        EqOp | NeOp => 6,
        LeftAngle | RightAngle | LeOp | GeOp => 7,
        LeftOp | RightOp => 8,
        Plus | Dash => 9,
        Star | Slash | Percent => 10,
        _ => return None,
    };
    Some(level)
}

/// Precedence climbing over the operands of one condition
struct Evaluator<'a> {
    operands: &'a [Operand],
    position: usize,
}

impl Evaluator<'_> {
    fn peek(&self) -> Option<Operand> {
        self.operands.get(self.position).copied()
    }

    fn bump(&mut self) -> Option<Operand> {
        let operand = self.peek();
        self.position += 1;
        operand
    }

    fn expression(&mut self, min_level: u8) -> Option<i64> {
        let mut lhs = self.unary()?;
        while let Some(Operand::Operator(operator)) = self.peek() {
            let Some(level) = precedence(operator) else {
                break;
            };
            if level <= min_level {
                break;
            }
            self.position += 1;
            let rhs = self.expression(level)?;
            lhs = apply(operator, lhs, rhs)?;
        }
        Some(lhs)
    }

    fn unary(&mut self) -> Option<i64> {
        match self.bump()? {
            Operand::Number(value) => Some(value),
            Operand::Operator(LogosToken::LeftParen) => {
                let value = self.expression(0)?;
                match self.bump()? {
                    Operand::Operator(LogosToken::RightParen) => Some(value),
                    _ => None,
                }
            }
            Operand::Operator(LogosToken::Bang) => Some(i64::from(self.unary()? == 0)),
            Operand::Operator(LogosToken::Tilde) => Some(!self.unary()?),
            Operand::Operator(LogosToken::Dash) => self.unary()?.checked_neg(),
            Operand::Operator(LogosToken::Plus) => self.unary(),
            Operand::Operator(_) => None,
        }
    }
}

fn apply(operator: LogosToken, lhs: i64, rhs: i64) -> Option<i64> {
    use LogosToken::*;
    let value = match operator {
        OrOp => i64::from(lhs != 0 || rhs != 0),
        AndOp => i64::from(lhs != 0 && rhs != 0),
        VerticalBar => lhs | rhs,
        Caret => lhs ^ rhs,
        Ampersand => lhs & rhs,
        EqOp => i64::from(lhs == rhs),
        NeOp => i64::from(lhs != rhs),
        LeftAngle => i64::from(lhs < rhs),
        RightAngle => i64::from(lhs > rhs),
        LeOp => i64::from(lhs <= rhs),
        GeOp => i64::from(lhs >= rhs),
        LeftOp => lhs.checked_shl(u32::try_from(rhs).ok()?)?,
        RightOp => lhs.checked_shr(u32::try_from(rhs).ok()?)?,
        Plus => lhs.checked_add(rhs)?,
        Dash => lhs.checked_sub(rhs)?,
        Star => lhs.checked_mul(rhs)?,
        Slash => lhs.checked_div(rhs)?,
        Percent => lhs.checked_rem(rhs)?,
        _ => return None,
    };
    Some(value)
}
