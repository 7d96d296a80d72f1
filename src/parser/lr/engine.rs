//! The shift-reduce driver.

use super::TerminalKind;
use super::grammar::Semantic;
use super::reduction::{Body, ParserSymbol, SymbolNode};
use super::tables::{Action, ParseTables, ProductionId, StateId};
use crate::parser::errors::{ParseError, ReductionError, ReductionErrorKind, SyntaxError};
use crate::parser::token::{Token, TokenSource};

/// What a single [`Parser::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The lookahead was pushed and the automaton moved to `state`.
    Shift {
        state: StateId,
        terminal: &'static str,
    },
    /// A production was reduced; the lookahead is still pending.
    Reduce {
        production: ProductionId,
        head: &'static str,
        state: StateId,
    },
    /// The input is complete; the result is on the stack.
    Accept,
}

/// One parse of one token source
///
/// Owns the state stack and the symbol stack. Between actions
/// `states.len() == symbols.len() + 1` holds. The first error stops the
/// parser for good: later steps fail with [`ParseError::Halted`] and
/// [`Parser::finish`] hands out nothing.
pub struct Parser<'t, T: 'static, N: 'static, S> {
    tables: &'t ParseTables<T, N>,
    source: S,
    states: Vec<StateId>,
    symbols: Vec<ParserSymbol<T, N>>,
    lookahead: Option<Token<T>>,
    accepted: bool,
    failed: bool,
    trace: bool,
}

impl<'t, T, N, S> Parser<'t, T, N, S>
where
    T: TerminalKind,
    N: SymbolNode,
    S: TokenSource<T>,
{
    pub fn new(tables: &'t ParseTables<T, N>, source: S) -> Self {
        Self {
            tables,
            source,
            states: vec![0],
            symbols: Vec::new(),
            lookahead: None,
            accepted: false,
            failed: false,
            trace: false,
        }
    }

    /// Emit a trace event for every action.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Depths of the state stack and the symbol stack
    pub fn stack_depths(&self) -> (usize, usize) {
        (self.states.len(), self.symbols.len())
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// An earlier step returned an error
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    fn current_state(&self) -> StateId {
        self.states.last().copied().unwrap_or(0)
    }

    /// Perform exactly one action.
    ///
    /// After [`Step::Accept`] further calls keep returning it; after an
    /// error they keep failing.
    pub fn step(&mut self) -> Result<Step, ParseError> {
        if self.failed {
            return Err(ParseError::Halted);
        }
        if self.accepted {
            return Ok(Step::Accept);
        }
        let result = self.advance();
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    fn advance(&mut self) -> Result<Step, ParseError> {

        let lookahead = match self.lookahead.take() {
            Some(token) => token,
            None => self.source.next_token()?,
        };
        let state = self.current_state();

        match self.tables.action(state, lookahead.terminal) {
            Action::Shift(next) => {
                let terminal = lookahead.terminal.grammar_name();
                if self.trace {
                    tracing::trace!(state, next, terminal, "shift");
                }
                self.symbols.push(ParserSymbol::Leaf(lookahead));
                self.states.push(next);
                Ok(Step::Shift {
                    state: next,
                    terminal,
                })
            }
            Action::Reduce(production) => {
                let offset = lookahead.range.start();
                self.lookahead = Some(lookahead);
                self.reduce(production, offset)
            }
            Action::Accept => {
                if self.trace {
                    tracing::trace!(state, "accept");
                }
                self.lookahead = Some(lookahead);
                self.accepted = true;
                Ok(Step::Accept)
            }
            Action::Error => Err(SyntaxError {
                state: state as usize,
                terminal: lookahead.terminal.index() as u16,
                found: lookahead.terminal.grammar_name(),
                range: lookahead.range,
                expected: self.tables.expected(state),
            }
            .into()),
        }
    }

    fn reduce(
        &mut self,
        id: ProductionId,
        lookahead: text_size::TextSize,
    ) -> Result<Step, ParseError> {
        let tables = self.tables;
        let (production, rule) = match (tables.production(id), tables.rule(id)) {
            (Some(production), Some(rule)) => (production, rule),
            _ => {
                return Err(ParseError::MissingGoto {
                    state: self.current_state() as usize,
                    nonterminal: "?",
                });
            }
        };
        let depth_error = |expected, actual| ReductionError {
            production: id as usize,
            head: production.head_name,
            kind: ReductionErrorKind::StackDepth { expected, actual },
        };

        let n = production.len();
        let before = self.symbols.len();
        if before < n {
            return Err(depth_error(n, before).into());
        }

        if self.trace {
            tracing::trace!(production = id, rule = %production, "reduce");
        }

        match rule.semantic {
            Semantic::Keep => {}
            Semantic::Build(action) => {
                let popped = self.symbols.split_off(before - n);
                let mut body = Body::new(id as usize, production.head_name, popped, lookahead);
                let node = action(&mut body)?;
                self.symbols.push(ParserSymbol::Node(node));
            }
        }

        let expected = before - n + 1;
        if self.symbols.len() != expected {
            return Err(depth_error(expected, self.symbols.len()).into());
        }

        self.states.truncate(self.states.len() - n);
        let from = self.current_state();
        let next = tables
            .goto(from, production.head)
            .ok_or(ParseError::MissingGoto {
                state: from as usize,
                nonterminal: production.head_name,
            })?;
        self.states.push(next);

        Ok(Step::Reduce {
            production: id,
            head: production.head_name,
            state: next,
        })
    }

    /// Drive the automaton to acceptance and hand out the root node.
    pub fn run(mut self) -> Result<N, ParseError> {
        while self.step()? != Step::Accept {}
        self.finish()
    }

    /// Take the root node after [`Step::Accept`].
    pub fn finish(mut self) -> Result<N, ParseError> {
        if self.failed {
            return Err(ParseError::Halted);
        }
        let depth_error = |actual| {
            ParseError::from(ReductionError {
                production: 0,
                head: "$START$",
                kind: ReductionErrorKind::StackDepth {
                    expected: 1,
                    actual,
                },
            })
        };
        if !self.accepted || self.symbols.len() != 1 {
            return Err(depth_error(self.symbols.len()));
        }
        match self.symbols.pop() {
            Some(ParserSymbol::Node(root)) => Ok(root),
            Some(ParserSymbol::Leaf(_)) => Err(depth_error(0)),
            None => Err(depth_error(0)),
        }
    }
}
