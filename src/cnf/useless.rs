/*
    Removal of useless symbols: first the non-generating ones, then the
    unreachable ones. In the other order a symbol could stay reachable only
    through a production that the generating filter removes afterwards.
*/

use std::collections::HashSet;

use tracing::debug;

use crate::grammar::Grammar;

/// Symbols that derive some string of terminals. Terminals trivially do.
pub fn find_generating(grammar: &Grammar) -> HashSet<String> {
    let mut generating: HashSet<String> = grammar.terminals().map(str::to_string).collect();

    let mut changed = true;
    while changed {
        changed = false;
        for production in grammar.productions() {
            if generating.contains(production.left().key()) {
                continue;
            }
            if production.right().iter().all(|symbol| generating.contains(symbol.key())) {
                generating.insert(production.left().key().to_string());
                changed = true;
            }
        }
    }

    generating
}

/// Symbols occurring in some sentential form derived from the start symbol.
pub fn find_reachable(grammar: &Grammar) -> HashSet<String> {
    let mut reachable = HashSet::new();
    reachable.insert(grammar.start().key().to_string());

    let mut changed = true;
    while changed {
        changed = false;
        for production in grammar.productions() {
            if !reachable.contains(production.left().key()) {
                continue;
            }
            for symbol in production.right() {
                if !reachable.contains(symbol.key()) {
                    reachable.insert(symbol.key().to_string());
                    changed = true;
                }
            }
        }
    }

    reachable
}

/// Returns the grammar restricted to productions whose symbols are all
/// generating and reachable.
///
/// The start symbol always stays registered, even when it generates nothing:
/// an empty language comes out as a grammar without productions whose only
/// nonterminal is the start symbol.
pub fn eliminate_useless(grammar: &Grammar) -> Grammar {
    let generating = find_generating(grammar);
    let mut useful = grammar.clone();
    useful.retain(|p| p.symbols().all(|symbol| generating.contains(symbol.key())));
    let after_generating = useful.production_count();

    let reachable = find_reachable(&useful);
    useful.retain(|p| p.symbols().all(|symbol| reachable.contains(symbol.key())));

    debug!(
        before = grammar.production_count(),
        after_generating,
        after = useful.production_count(),
        "eliminated useless symbols"
    );
    useful
}
