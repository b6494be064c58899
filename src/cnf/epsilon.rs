/*
    Removal of ε-productions
*/

use std::collections::HashSet;

use indexmap::IndexSet;
use itertools::Itertools;
use tracing::debug;

use crate::grammar::{Grammar, Production};

/// Nonterminals that derive the empty string, by least fixpoint: `A` is
/// nullable if some production of `A` has a right side made only of nullable
/// nonterminals (an empty right side qualifies trivially).
pub fn find_nullable(grammar: &Grammar) -> HashSet<String> {
    let mut nullable = HashSet::new();

    let mut changed = true;
    while changed {
        changed = false;
        for production in grammar.productions() {
            if nullable.contains(production.left().key()) {
                continue;
            }
            let all_nullable = production
                .right()
                .iter()
                .all(|symbol| symbol.is_nonterminal() && nullable.contains(symbol.key()));
            if all_nullable {
                nullable.insert(production.left().key().to_string());
                changed = true;
            }
        }
    }

    nullable
}

// Every production obtained by omitting a subset of the nullable positions.
// There are 2^k of them for k nullable positions; the unmodified production
// comes first.
fn variants<'a>(production: &'a Production, nullable: &'a HashSet<String>) -> impl Iterator<Item = Production> + 'a {
    let positions = production
        .right()
        .iter()
        .positions(|symbol| nullable.contains(symbol.key()))
        .collect_vec();

    positions.into_iter().powerset().map(move |omitted| {
        let right = production
            .right()
            .iter()
            .enumerate()
            .filter(|(i, _)| !omitted.contains(i))
            .map(|(_, symbol)| symbol.clone())
            .collect();
        Production::new(production.left().key(), right)
    })
}

/// Returns an equivalent grammar (up to the empty string) without
/// ε-productions, except possibly `S -> ε` for the start symbol `S`.
///
/// The number of variants is exponential in the count of nullable symbols of
/// a single right side.
pub fn eliminate_epsilon(grammar: &Grammar) -> Grammar {
    let nullable = find_nullable(grammar);
    let start = grammar.start();

    let mut productions = IndexSet::new();
    for production in grammar.productions() {
        for variant in variants(production, &nullable) {
            if variant.is_epsilon() && variant.left() != start {
                continue;
            }
            productions.insert(variant);
        }
    }

    debug!(
        nullable = nullable.len(),
        before = grammar.production_count(),
        after = productions.len(),
        "eliminated ε-productions"
    );
    Grammar::from_productions(start.key(), productions)
}
