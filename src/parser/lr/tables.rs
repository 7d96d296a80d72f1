//! Dense action and goto tables.

use super::TerminalKind;
use super::grammar::{Grammar, Production, Rule};
use super::lalr;
use crate::parser::errors::GrammarError;

pub type StateId = u32;
pub type ProductionId = u32;

/// Entry of the action table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Shift(StateId),
    Reduce(ProductionId),
    Accept,
    Error,
}

/// Two actions competed for one table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub state: StateId,
    pub terminal: &'static str,
    pub chosen: Action,
    pub discarded: Action,
}

impl Conflict {
    pub fn is_shift_reduce(&self) -> bool {
        matches!(
            (self.chosen, self.discarded),
            (Action::Shift(_), Action::Reduce(_)) | (Action::Reduce(_), Action::Shift(_))
        )
    }
}

/// Immutable parse tables of one language
///
/// `action` and `goto` are total: every pair not produced by the
/// construction is [`Action::Error`] or `None`.
pub struct ParseTables<T: 'static, N: 'static> {
    rules: &'static [Rule<T, N>],
    grammar: Grammar,
    state_count: usize,
    actions: Vec<Action>,
    gotos: Vec<Option<StateId>>,
    conflicts: Vec<Conflict>,
}

impl<T: TerminalKind, N> ParseTables<T, N> {
    /// Resolve `rules` and compute the tables.
    ///
    /// Conflicts are resolved in favour of shifting, then of the production
    /// listed first.
    pub fn build(rules: &'static [Rule<T, N>]) -> Result<Self, GrammarError> {
        let grammar = Grammar::resolve(rules)?;
        let states = lalr::construct(&grammar, T::END.index());

        let columns = grammar.terminal_count();
        let nonterminals = grammar.nonterminal_count();
        let mut actions = vec![Action::Error; states.len() * columns];
        let mut gotos = vec![None; states.len() * nonterminals];
        let mut conflicts = Vec::new();

        for (state, row) in states.iter().enumerate() {
            for &(terminal, target) in &row.shifts {
                actions[state * columns + terminal] = Action::Shift(target as StateId);
            }
            for &(nonterminal, target) in &row.gotos {
                gotos[state * nonterminals + nonterminal] = Some(target as StateId);
            }
            for &(terminal, production) in &row.reductions {
                let incoming = if production == 0 {
                    Action::Accept
                } else {
                    Action::Reduce(production as ProductionId)
                };
                let cell = &mut actions[state * columns + terminal];
                let current = *cell;
                let (chosen, discarded) = match current {
                    Action::Error => {
                        *cell = incoming;
                        continue;
                    }
                    Action::Shift(_) | Action::Accept => (current, incoming),
                    Action::Reduce(existing) => match incoming {
                        Action::Reduce(new) if new < existing => (incoming, current),
                        Action::Accept => (incoming, current),
                        _ => (current, incoming),
                    },
                };
                *cell = chosen;
                let conflict = Conflict {
                    state: state as StateId,
                    terminal: grammar.terminal_name(terminal),
                    chosen,
                    discarded,
                };
                tracing::debug!(
                    state = conflict.state,
                    terminal = conflict.terminal,
                    chosen = ?conflict.chosen,
                    discarded = ?conflict.discarded,
                    "resolved parse table conflict"
                );
                conflicts.push(conflict);
            }
        }

        tracing::debug!(
            states = states.len(),
            productions = grammar.productions().len(),
            conflicts = conflicts.len(),
            "built parse tables"
        );

        Ok(Self {
            rules,
            grammar,
            state_count: states.len(),
            actions,
            gotos,
            conflicts,
        })
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Action for `terminal` in `state`, after wildcard lookup
    pub fn action(&self, state: StateId, terminal: T) -> Action {
        let Some(column) = terminal.lookup().map(T::index) else {
            return Action::Error;
        };
        let columns = self.grammar.terminal_count();
        if column >= columns {
            return Action::Error;
        }
        self.actions
            .get(state as usize * columns + column)
            .copied()
            .unwrap_or(Action::Error)
    }

    pub fn goto(&self, state: StateId, nonterminal: usize) -> Option<StateId> {
        let columns = self.grammar.nonterminal_count();
        if nonterminal >= columns {
            return None;
        }
        self.gotos
            .get(state as usize * columns + nonterminal)
            .copied()
            .flatten()
    }

    pub fn production(&self, id: ProductionId) -> Option<&Production> {
        self.grammar.production(id as usize)
    }

    pub fn rule(&self, id: ProductionId) -> Option<&'static Rule<T, N>> {
        self.rules.get(id as usize)
    }

    /// Grammar names of the terminals with a non-error action in `state`
    pub fn expected(&self, state: StateId) -> Vec<&'static str> {
        let columns = self.grammar.terminal_count();
        let start = state as usize * columns;
        match self.actions.get(start..start + columns) {
            Some(row) => row
                .iter()
                .enumerate()
                .filter(|(_, action)| **action != Action::Error)
                .map(|(terminal, _)| self.grammar.terminal_name(terminal))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Conflicts met during construction, in the order they were resolved
    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }
}

impl<T, N> std::fmt::Debug for ParseTables<T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseTables")
            .field("states", &self.state_count)
            .field("productions", &self.rules.len())
            .field("conflicts", &self.conflicts.len())
            .finish()
    }
}
