//! Rules and their resolution into a numbered grammar.

use rustc_hash::FxHashMap;

use super::TerminalKind;
use super::reduction::Body;
use crate::parser::errors::{GrammarError, ReductionError};

/// What happens when a production is reduced
pub enum Semantic<T: 'static, N: 'static> {
    /// Unit production: the single body symbol stays on the stack as the
    /// result.
    Keep,
    /// Pop the body, build one node from it and push that node.
    Build(fn(&mut Body<T, N>) -> Result<N, ReductionError>),
}

impl<T, N> Clone for Semantic<T, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, N> Copy for Semantic<T, N> {}

/// One grammar rule, `head ::= body`
///
/// The body is a whitespace separated list of symbol names. A name is a
/// nonterminal if some rule has it as head and a terminal otherwise.
pub struct Rule<T: 'static, N: 'static> {
    pub head: &'static str,
    pub body: &'static str,
    pub semantic: Semantic<T, N>,
}

impl<T, N> std::fmt::Debug for Rule<T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ::= {}", self.head, self.body)
    }
}

/// A unit production whose child is the result
pub const fn keep<T, N>(head: &'static str, body: &'static str) -> Rule<T, N> {
    Rule {
        head,
        body,
        semantic: Semantic::Keep,
    }
}

/// A production with a semantic action
pub const fn build<T, N>(
    head: &'static str,
    body: &'static str,
    action: fn(&mut Body<T, N>) -> Result<N, ReductionError>,
) -> Rule<T, N> {
    Rule {
        head,
        body,
        semantic: Semantic::Build(action),
    }
}

/// A resolved body symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(usize),
    Nonterminal(usize),
}

/// A rule with its symbols resolved to ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub id: usize,
    pub head: usize,
    pub head_name: &'static str,
    pub body: Vec<Symbol>,
    pub body_names: Vec<&'static str>,
}

impl Production {
    /// Number of body symbols, i.e. stack entries a reduction spans
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl std::fmt::Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ::= {}", self.head_name, self.body_names.join(" "))
    }
}

/// Numbered productions over numbered terminals and nonterminals
///
/// Production 0 is the augmented start rule and nonterminal 0 its head.
#[derive(Debug, Clone)]
pub struct Grammar {
    terminal_count: usize,
    terminal_names: Vec<&'static str>,
    nonterminals: Vec<&'static str>,
    productions: Vec<Production>,
    by_head: Vec<Vec<usize>>,
}

impl Grammar {
    pub fn resolve<T: TerminalKind, N>(rules: &[Rule<T, N>]) -> Result<Self, GrammarError> {
        if rules.is_empty() {
            return Err(GrammarError::Empty);
        }

        let mut nonterminals = Vec::new();
        let mut nonterminal_ids = FxHashMap::default();
        for rule in rules {
            nonterminal_ids.entry(rule.head).or_insert_with(|| {
                nonterminals.push(rule.head);
                nonterminals.len() - 1
            });
        }

        let terminal_names: Vec<&'static str> = (0..T::COUNT)
            .map(|index| T::from_index(index).map_or("", T::grammar_name))
            .collect();
        let terminal_ids: FxHashMap<&'static str, usize> = terminal_names
            .iter()
            .enumerate()
            .map(|(index, name)| (*name, index))
            .collect();

        let mut productions = Vec::with_capacity(rules.len());
        let mut by_head = vec![Vec::new(); nonterminals.len()];
        for (id, rule) in rules.iter().enumerate() {
            let head = nonterminal_ids[rule.head];
            let body_names: Vec<&'static str> = rule.body.split_whitespace().collect();
            let body = body_names
                .iter()
                .map(|name| {
                    if let Some(&nt) = nonterminal_ids.get(name) {
                        Ok(Symbol::Nonterminal(nt))
                    } else if let Some(&t) = terminal_ids.get(name) {
                        Ok(Symbol::Terminal(t))
                    } else {
                        Err(GrammarError::UnknownSymbol {
                            production: id,
                            head: rule.head,
                            symbol: name,
                        })
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;

            if matches!(rule.semantic, Semantic::Keep) && body.len() != 1 {
                return Err(GrammarError::KeepArity {
                    production: id,
                    head: rule.head,
                    len: body.len(),
                });
            }

            by_head[head].push(id);
            productions.push(Production {
                id,
                head,
                head_name: rule.head,
                body,
                body_names,
            });
        }

        Ok(Self {
            terminal_count: T::COUNT,
            terminal_names,
            nonterminals,
            productions,
            by_head,
        })
    }

    pub fn terminal_count(&self) -> usize {
        self.terminal_count
    }

    pub fn terminal_name(&self, terminal: usize) -> &'static str {
        self.terminal_names.get(terminal).copied().unwrap_or("?")
    }

    pub fn nonterminal_count(&self) -> usize {
        self.nonterminals.len()
    }

    pub fn nonterminal_name(&self, nonterminal: usize) -> &'static str {
        self.nonterminals.get(nonterminal).copied().unwrap_or("?")
    }

    pub fn nonterminal(&self, name: &str) -> Option<usize> {
        self.nonterminals.iter().position(|nt| *nt == name)
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, id: usize) -> Option<&Production> {
        self.productions.get(id)
    }

    /// Ids of the productions whose head is `nonterminal`
    pub fn alternatives(&self, nonterminal: usize) -> &[usize] {
        &self.by_head[nonterminal]
    }
}
