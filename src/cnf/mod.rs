/*
    This module turns an arbitrary context-free grammar into an equivalent
    grammar in Chomsky Normal Form
*/

pub mod assembly;
pub mod epsilon;
pub mod unit;
pub mod useless;

use std::collections::HashSet;

use tracing::{debug, info};

use crate::grammar::{Grammar, Production};

/// Hands out nonterminal names that do not clash with any symbol of the
/// grammar being converted, nor with each other.
///
/// Names are a prefix followed by a counter shared by every prefix.
#[derive(Debug)]
pub struct SymbolFactory {
    counter: usize,
    taken: HashSet<String>,
}

impl SymbolFactory {
    pub fn for_grammar(grammar: &Grammar) -> Self {
        SymbolFactory {
            counter: 0,
            taken: grammar.nonterminals().chain(grammar.terminals()).map(str::to_string).collect(),
        }
    }

    pub fn fresh(&mut self, prefix: &str) -> String {
        loop {
            self.counter += 1;
            let name = format!("{}{}", prefix, self.counter);
            if self.taken.insert(name.clone()) {
                return name;
            }
        }
    }
}

/// One conversion run. The symbol factory lives as long as the run, so the
/// fresh names of different passes never collide.
pub struct Converter<'g> {
    grammar: &'g Grammar,
    symbols: SymbolFactory,
}

impl<'g> Converter<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Converter {
            grammar,
            symbols: SymbolFactory::for_grammar(grammar),
        }
    }

    pub fn convert(mut self) -> Grammar {
        debug!(
            productions = self.grammar.production_count(),
            nonterminals = self.grammar.nonterminal_count(),
            "converting to CNF"
        );

        let grammar = self.with_fresh_start();
        let grammar = epsilon::eliminate_epsilon(&grammar);
        let grammar = unit::eliminate_unit(&grammar);
        let grammar = useless::eliminate_useless(&grammar);
        let grammar = assembly::isolate_terminals(&grammar, &mut self.symbols);
        let grammar = assembly::split_long_productions(&grammar, &mut self.symbols);

        info!(
            productions = grammar.production_count(),
            nonterminals = grammar.nonterminal_count(),
            "converted to CNF"
        );
        grammar
    }

    // A nullable start symbol keeps `S -> ε`, which is only allowed while S
    // never appears on a right side. Otherwise a new start `S<n> -> S` is
    // put in front.
    fn with_fresh_start(&mut self) -> Grammar {
        let grammar = self.grammar;
        let start = grammar.start();
        let nullable = epsilon::find_nullable(grammar);
        if !nullable.contains(start.key()) || !grammar.start_on_right_side() {
            return grammar.clone();
        }

        let fresh = self.symbols.fresh(start.key());
        debug!(start = %fresh, "introduced a new start symbol");
        let mut prefixed = Grammar::new(fresh.as_str());
        prefixed.add_production(Production::new(fresh, vec![start.clone()]));
        prefixed.add_productions(grammar.productions().iter().cloned());
        prefixed
    }
}

/// Converts `grammar` to Chomsky Normal Form. The input is left untouched.
///
/// The result generates the same language, and `convert_to_cnf` applied to
/// it again yields an equal grammar.
pub fn convert_to_cnf(grammar: &Grammar) -> Grammar {
    Converter::new(grammar).convert()
}
