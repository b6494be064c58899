/*
    This module is for storing and manipulating grammars
*/

mod production;
mod symbol;

use std::collections::HashMap;
use std::fmt::Display;

use indexmap::IndexSet;
use itertools::Itertools;

pub use production::Production;
pub use symbol::{is_nonterminal_spelling, symbols_to_string, Symbol, EPSILON_SPELLINGS};

/// A context-free grammar.
///
/// Productions keep their insertion order, which every pass relies on for
/// reproducible output. Terminals and nonterminals are indexed in the order
/// they were first seen; the start symbol is always registered.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: Symbol,
    productions: Vec<Production>,
    terminals: IndexSet<String>,
    nonterminals: IndexSet<String>,
    // left symbol key -> positions in `productions`
    by_left: HashMap<String, Vec<usize>>,
}

impl Grammar {
    pub fn new(start: impl Into<String>) -> Self {
        let start = start.into();
        let mut nonterminals = IndexSet::new();
        nonterminals.insert(start.clone());
        Grammar {
            start: Symbol::NonTerminal(start),
            productions: Vec::new(),
            terminals: IndexSet::new(),
            nonterminals,
            by_left: HashMap::new(),
        }
    }

    pub fn from_productions(start: impl Into<String>, productions: impl IntoIterator<Item = Production>) -> Self {
        let mut grammar = Grammar::new(start);
        grammar.add_productions(productions);
        grammar
    }

    pub fn start(&self) -> &Symbol {
        &self.start
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn add_production(&mut self, production: Production) {
        self.register(&production);
        self.by_left
            .entry(production.left().key().to_string())
            .or_default()
            .push(self.productions.len());
        self.productions.push(production);
    }

    pub fn add_productions(&mut self, productions: impl IntoIterator<Item = Production>) {
        for production in productions {
            self.add_production(production);
        }
    }

    fn register(&mut self, production: &Production) {
        for symbol in production.symbols() {
            match symbol {
                Symbol::Terminal(value) => self.terminals.insert(value.clone()),
                Symbol::NonTerminal(value) => self.nonterminals.insert(value.clone()),
            };
        }
    }

    /// All productions `symbol -> ...`
    pub fn productions_for<'a>(&'a self, symbol: &Symbol) -> impl Iterator<Item = &'a Production> + 'a {
        self.by_left
            .get(symbol.key())
            .into_iter()
            .flatten()
            .map(|&i| &self.productions[i])
    }

    /// All productions whose right side is exactly `symbols`.
    ///
    /// This is a linear scan over every production.
    pub fn productions_with(&self, symbols: &[Symbol]) -> Vec<&Production> {
        self.productions.iter().filter(|p| p.right() == symbols).collect()
    }

    /// All productions `A -> terminal`
    pub fn productions_generating(&self, terminal: &str) -> Vec<&Production> {
        self.productions
            .iter()
            .filter(|p| matches!(p.right(), [Symbol::Terminal(t)] if t == terminal))
            .collect()
    }

    pub fn has_production(&self, production: &Production) -> bool {
        self.productions_for(production.left()).any(|p| p == production)
    }

    /// Whether the grammar is in Chomsky Normal Form.
    ///
    /// `S -> ε` is tolerated for the start symbol as long as the start symbol
    /// never appears on a right side.
    pub fn is_cnf(&self) -> bool {
        self.first_non_cnf().is_none()
    }

    pub fn first_non_cnf(&self) -> Option<&Production> {
        let start_on_right = self.start_on_right_side();
        self.productions.iter().find(|p| {
            !(p.is_cnf() || (p.is_epsilon() && *p.left() == self.start && !start_on_right))
        })
    }

    /// Whether the start symbol rewrites directly to ε. For a CNF grammar
    /// this is exactly whether the empty sentence is in the language.
    pub fn has_start_epsilon(&self) -> bool {
        self.productions_for(&self.start).any(Production::is_epsilon)
    }

    pub fn start_on_right_side(&self) -> bool {
        self.productions.iter().any(|p| p.right().contains(&self.start))
    }

    /// Removes every copy of `production`, rebuilding the indices.
    pub fn remove_production(&mut self, production: &Production) {
        self.retain(|p| p != production);
    }

    /// Keeps only the productions matching `keep`, rebuilding the indices.
    pub fn retain(&mut self, keep: impl FnMut(&Production) -> bool) {
        self.productions.retain(keep);
        self.rebuild_indices();
    }

    fn rebuild_indices(&mut self) {
        let productions = std::mem::take(&mut self.productions);
        let rebuilt = Grammar::from_productions(self.start.key(), productions);
        *self = rebuilt;
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.nonterminals.iter().map(String::as_str)
    }

    pub fn terminals(&self) -> impl Iterator<Item = &str> {
        self.terminals.iter().map(String::as_str)
    }

    /// Position of a nonterminal in first-seen order
    pub fn nonterminal_index(&self, key: &str) -> Option<usize> {
        self.nonterminals.get_index_of(key)
    }

    pub fn is_nonterminal(&self, key: &str) -> bool {
        self.nonterminals.contains(key)
    }

    pub fn is_terminal(&self, key: &str) -> bool {
        self.terminals.contains(key)
    }

    /// Whether any symbol of the grammar is spelled `name`
    pub fn contains_name(&self, name: &str) -> bool {
        self.is_nonterminal(name) || self.is_terminal(name)
    }

    pub fn production_count(&self) -> usize {
        self.productions.len()
    }

    pub fn nonterminal_count(&self) -> usize {
        self.nonterminals.len()
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }
}

impl PartialEq for Grammar {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.productions == other.productions
    }
}

impl Eq for Grammar {}

// One line per nonterminal, `A -> x | y`, in first-seen order
impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for nonterminal in self.nonterminals() {
            let Some(positions) = self.by_left.get(nonterminal) else {
                continue;
            };
            let rewrites = positions
                .iter()
                .map(|&i| symbols_to_string(self.productions[i].right()))
                .join(" | ");
            writeln!(f, "{} -> {}", nonterminal, rewrites)?;
        }
        Ok(())
    }
}
