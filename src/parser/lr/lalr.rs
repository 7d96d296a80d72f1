//! LALR(1) automaton construction.
//!
//! States are identified by their LR(0) kernel. Lookaheads are computed with
//! LR(1) closures and merged into the state with the same kernel; a state
//! whose lookaheads grow is processed again until nothing changes.

use std::collections::VecDeque;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use super::grammar::{Grammar, Symbol};

/// A fixed-width set of terminal ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TerminalSet {
    words: Vec<u64>,
}

impl TerminalSet {
    pub(super) fn new(count: usize) -> Self {
        Self {
            words: vec![0; count.div_ceil(64)],
        }
    }

    pub(super) fn insert(&mut self, terminal: usize) -> bool {
        let (word, bit) = (terminal / 64, 1u64 << (terminal % 64));
        let changed = self.words[word] & bit == 0;
        self.words[word] |= bit;
        changed
    }

    pub(super) fn union(&mut self, other: &TerminalSet) -> bool {
        let mut changed = false;
        for (word, other) in self.words.iter_mut().zip(&other.words) {
            let merged = *word | *other;
            changed |= merged != *word;
            *word = merged;
        }
        changed
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(index, &word)| {
            (0..64)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| index * 64 + bit)
        })
    }
}

/// FIRST sets and nullability of every nonterminal
pub(super) struct FirstSets {
    first: Vec<TerminalSet>,
    nullable: Vec<bool>,
}

impl FirstSets {
    pub(super) fn compute(grammar: &Grammar) -> Self {
        let terminals = grammar.terminal_count();
        let mut first = vec![TerminalSet::new(terminals); grammar.nonterminal_count()];
        let mut nullable = vec![false; grammar.nonterminal_count()];

        let mut changed = true;
        while changed {
            changed = false;
            for production in grammar.productions() {
                let head = production.head;
                let mut all_nullable = true;
                for symbol in &production.body {
                    match *symbol {
                        Symbol::Terminal(t) => {
                            changed |= first[head].insert(t);
                            all_nullable = false;
                        }
                        Symbol::Nonterminal(nt) => {
                            if nt != head {
                                let other = first[nt].clone();
                                changed |= first[head].union(&other);
                            }
                            all_nullable = nullable[nt];
                        }
                    }
                    if !all_nullable {
                        break;
                    }
                }
                if all_nullable && !nullable[head] {
                    nullable[head] = true;
                    changed = true;
                }
            }
        }

        Self { first, nullable }
    }

    /// Add FIRST(symbols) to `set`; returns whether `symbols` derives the
    /// empty string.
    pub(super) fn extend_first(&self, symbols: &[Symbol], set: &mut TerminalSet) -> bool {
        for symbol in symbols {
            match *symbol {
                Symbol::Terminal(t) => {
                    set.insert(t);
                    return false;
                }
                Symbol::Nonterminal(nt) => {
                    set.union(&self.first[nt]);
                    if !self.nullable[nt] {
                        return false;
                    }
                }
            }
        }
        true
    }

    #[cfg(test)]
    pub(super) fn first(&self, nonterminal: usize) -> &TerminalSet {
        &self.first[nonterminal]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Item {
    production: usize,
    dot: usize,
}

type LrItems = Vec<(Item, TerminalSet)>;

/// One automaton state, ready to be turned into table rows
#[derive(Debug, Default)]
pub(super) struct LalrState {
    /// `(terminal, target state)`
    pub(super) shifts: Vec<(usize, usize)>,
    /// `(nonterminal, target state)`
    pub(super) gotos: Vec<(usize, usize)>,
    /// `(lookahead terminal, production)`
    pub(super) reductions: Vec<(usize, usize)>,
}

struct Builder<'g> {
    grammar: &'g Grammar,
    first: FirstSets,
}

impl Builder<'_> {
    fn closure(&self, kernel: &[(Item, TerminalSet)]) -> LrItems {
        let mut items: LrItems = kernel.to_vec();
        let mut index: FxHashMap<Item, usize> = items
            .iter()
            .enumerate()
            .map(|(position, (item, _))| (*item, position))
            .collect();
        let mut work: Vec<usize> = (0..items.len()).collect();

        while let Some(position) = work.pop() {
            let item = items[position].0;
            let production = &self.grammar.productions()[item.production];
            let Some(&Symbol::Nonterminal(next)) = production.body.get(item.dot) else {
                continue;
            };

            let mut lookahead = TerminalSet::new(self.grammar.terminal_count());
            if self
                .first
                .extend_first(&production.body[item.dot + 1..], &mut lookahead)
            {
                let inherited = items[position].1.clone();
                lookahead.union(&inherited);
            }

            for &alternative in self.grammar.alternatives(next) {
                let derived = Item {
                    production: alternative,
                    dot: 0,
                };
                match index.get(&derived) {
                    Some(&existing) => {
                        if items[existing].1.union(&lookahead) {
                            work.push(existing);
                        }
                    }
                    None => {
                        index.insert(derived, items.len());
                        items.push((derived, lookahead.clone()));
                        work.push(items.len() - 1);
                    }
                }
            }
        }

        items
    }

    /// Kernels of the successor states, keyed by the symbol crossed
    fn successors(&self, closure: &LrItems) -> IndexMap<Symbol, LrItems> {
        let mut moves: IndexMap<Symbol, LrItems> = IndexMap::new();
        for (item, lookahead) in closure {
            let production = &self.grammar.productions()[item.production];
            if let Some(&symbol) = production.body.get(item.dot) {
                let advanced = Item {
                    production: item.production,
                    dot: item.dot + 1,
                };
                moves
                    .entry(symbol)
                    .or_default()
                    .push((advanced, lookahead.clone()));
            }
        }
        for kernel in moves.values_mut() {
            kernel.sort_by_key(|(item, _)| *item);
        }
        moves
    }
}

/// Build the LALR(1) automaton; state 0 is the start state.
///
/// `end` is the id of the end-of-input terminal.
pub(super) fn construct(grammar: &Grammar, end: usize) -> Vec<LalrState> {
    let builder = Builder {
        grammar,
        first: FirstSets::compute(grammar),
    };

    let mut start_lookahead = TerminalSet::new(grammar.terminal_count());
    start_lookahead.insert(end);
    let start = Item {
        production: 0,
        dot: 0,
    };

    let mut kernels: Vec<LrItems> = vec![vec![(start, start_lookahead)]];
    let mut lookup: FxHashMap<Vec<Item>, usize> = FxHashMap::default();
    lookup.insert(vec![start], 0);
    let mut transitions: Vec<IndexMap<Symbol, usize>> = vec![IndexMap::new()];
    let mut queued = vec![true];
    let mut work = VecDeque::from([0usize]);
    let mut passes = 0usize;

    while let Some(state) = work.pop_front() {
        queued[state] = false;
        passes += 1;
        let closure = builder.closure(&kernels[state]);

        for (symbol, kernel) in builder.successors(&closure) {
            let key: Vec<Item> = kernel.iter().map(|(item, _)| *item).collect();
            let target = match lookup.get(&key) {
                Some(&target) => {
                    let mut grown = false;
                    for ((_, incoming), (_, existing)) in kernel.iter().zip(&mut kernels[target]) {
                        grown |= existing.union(incoming);
                    }
                    if grown && !queued[target] {
                        queued[target] = true;
                        work.push_back(target);
                    }
                    target
                }
                None => {
                    let target = kernels.len();
                    kernels.push(kernel);
                    lookup.insert(key, target);
                    transitions.push(IndexMap::new());
                    queued.push(true);
                    work.push_back(target);
                    target
                }
            };
            transitions[state].insert(symbol, target);
        }
    }

    tracing::debug!(
        states = kernels.len(),
        passes,
        "computed LALR(1) item sets"
    );

    kernels
        .iter()
        .zip(&transitions)
        .map(|(kernel, moves)| {
            let mut state = LalrState::default();
            for (&symbol, &target) in moves {
                match symbol {
                    Symbol::Terminal(t) => state.shifts.push((t, target)),
                    Symbol::Nonterminal(nt) => state.gotos.push((nt, target)),
                }
            }
            for (item, lookahead) in builder.closure(kernel) {
                if item.dot == grammar.productions()[item.production].len() {
                    state
                        .reductions
                        .extend(lookahead.iter().map(|t| (t, item.production)));
                }
            }
            state
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_set_operations() {
        let mut set = TerminalSet::new(130);
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert!(set.insert(129));

        let mut other = TerminalSet::new(130);
        other.insert(64);
        assert!(set.union(&other));
        assert!(!set.union(&other));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![3, 64, 129]);
    }
}
