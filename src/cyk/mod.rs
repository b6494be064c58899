/*
    This module recognises sentences with the Cocke–Younger–Kasami chart
    algorithm and recovers a derivation tree for the accepted ones
*/

pub mod table;
pub mod tree;

use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::grammar::{Grammar, Production, Symbol};
use table::{CellEntry, EntryId, Table};
use tree::Derivation;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    // The chart only works on CNF grammars
    GrammarNotCnf { production: Production },
    // Nothing to recognise
    EmptyInput,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::GrammarNotCnf { production } => {
                write!(f, "Grammar is not in Chomsky Normal Form: `{}`", production)
            }
            ParseError::EmptyInput => write!(f, "Cannot parse an empty input"),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone)]
pub struct ParseResult {
    pub accepted: bool,
    pub table: Table,
    // The start symbol's entry in the top cell, if accepted
    pub tree: Option<EntryId>,
    pub elapsed: Duration,
}

impl ParseResult {
    pub fn derivation(&self) -> Option<Derivation<'_>> {
        self.tree.map(|id| Derivation::new(&self.table, id))
    }
}

/// A chart parser bound to one CNF grammar.
///
/// The binary productions are indexed once by their right side, so every
/// (B, C) lookup while filling the chart is a pair of hash lookups.
pub struct Cyk<'g> {
    grammar: &'g Grammar,
    // B -> C -> every `A -> B C`, in grammar order
    pairs: HashMap<&'g str, HashMap<&'g str, Vec<&'g Production>>>,
}

impl<'g> Cyk<'g> {
    pub fn new(grammar: &'g Grammar) -> Result<Self, ParseError> {
        if let Some(production) = grammar.first_non_cnf() {
            return Err(ParseError::GrammarNotCnf { production: production.clone() });
        }

        let mut pairs: HashMap<&str, HashMap<&str, Vec<&Production>>> = HashMap::new();
        for production in grammar.productions() {
            if let [Symbol::NonTerminal(b), Symbol::NonTerminal(c)] = production.right() {
                pairs
                    .entry(b.as_str())
                    .or_default()
                    .entry(c.as_str())
                    .or_default()
                    .push(production);
            }
        }

        Ok(Cyk { grammar, pairs })
    }

    fn pair_productions(&self, b: &str, c: &str) -> &[&'g Production] {
        self.pairs
            .get(b)
            .and_then(|row| row.get(c))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Fills the chart for `tokens`.
    ///
    /// When a nonterminal can be derived for a span in several ways, the
    /// first one found is kept: split points in ascending order, then the
    /// left cell's symbols in insertion order, then the right cell's, then
    /// the productions in grammar order.
    pub fn parse<T: AsRef<str>>(&self, tokens: &[T]) -> Result<ParseResult, ParseError> {
        if tokens.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let started = Instant::now();
        let n = tokens.len();
        let mut table = Table::new(n);

        for (i, token) in tokens.iter().enumerate() {
            for production in self.grammar.productions_generating(token.as_ref()) {
                table.insert(CellEntry::leaf(production.clone(), i));
            }
            table.finalize(i, i);
        }

        for length in 2..=n {
            for i in 0..=n - length {
                let j = i + length - 1;

                // Only the first derivation of each symbol is kept
                let mut candidates = Vec::new();
                let mut derived: HashSet<&str> = HashSet::new();
                for k in i..j {
                    let (Some(left), Some(right)) = (table.cell(i, k), table.cell(k + 1, j)) else {
                        continue;
                    };
                    for (b, left_id) in left.iter() {
                        for (c, right_id) in right.iter() {
                            for &production in self.pair_productions(b, c) {
                                if !derived.insert(production.left().key()) {
                                    continue;
                                }
                                candidates.push(CellEntry {
                                    production: production.clone(),
                                    span: (i, j),
                                    split: Some(k),
                                    children: Some((left_id, right_id)),
                                });
                            }
                        }
                    }
                }

                for candidate in candidates {
                    table.insert(candidate);
                }
                table.finalize(i, j);
                trace!(i, j, cell = %table.cell(i, j).map(ToString::to_string).unwrap_or_default(), "filled span");
            }
        }

        let tree = table.top_cell().and_then(|cell| cell.get(self.grammar.start().key()));
        let elapsed = started.elapsed();
        debug!(tokens = n, entries = table.entry_count(), accepted = tree.is_some(), ?elapsed, "parsed");

        Ok(ParseResult {
            accepted: tree.is_some(),
            table,
            tree,
            elapsed,
        })
    }
}

/// Runs the chart parser of `grammar` on `tokens`. The grammar is checked
/// for CNF before the input is looked at.
pub fn parse<T: AsRef<str>>(grammar: &Grammar, tokens: &[T]) -> Result<ParseResult, ParseError> {
    Cyk::new(grammar)?.parse(tokens)
}
