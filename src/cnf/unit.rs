/*
    Removal of unit productions (A -> B)
*/

use indexmap::IndexSet;
use tracing::debug;

use crate::grammar::Grammar;

/// The pairs (A, B) such that A derives B through zero or more unit
/// productions, over the nonterminals of one grammar.
pub struct UnitPairs<'g> {
    grammar: &'g Grammar,
    // reach[a][b] by nonterminal position
    reach: Vec<Vec<bool>>,
}

impl<'g> UnitPairs<'g> {
    pub fn compute(grammar: &'g Grammar) -> Self {
        let n = grammar.nonterminal_count();
        let mut reach = vec![vec![false; n]; n];

        for (i, row) in reach.iter_mut().enumerate() {
            row[i] = true;
        }

        for production in grammar.productions().iter().filter(|p| p.is_unit()) {
            let from = grammar.nonterminal_index(production.left().key());
            let to = grammar.nonterminal_index(production.right()[0].key());
            if let (Some(from), Some(to)) = (from, to) {
                reach[from][to] = true;
            }
        }

        // Transitive closure, cubic in the number of nonterminals
        for k in 0..n {
            for i in 0..n {
                if !reach[i][k] {
                    continue;
                }
                for j in 0..n {
                    if reach[k][j] {
                        reach[i][j] = true;
                    }
                }
            }
        }

        UnitPairs { grammar, reach }
    }

    pub fn contains(&self, from: &str, to: &str) -> bool {
        match (self.grammar.nonterminal_index(from), self.grammar.nonterminal_index(to)) {
            (Some(from), Some(to)) => self.reach[from][to],
            _ => false,
        }
    }

    /// Every A with (A, `to`) in the set, in first-seen order.
    pub fn derivers_of<'a>(&'a self, to: &str) -> impl Iterator<Item = &'g str> + 'a {
        let to = self.grammar.nonterminal_index(to);
        self.grammar
            .nonterminals()
            .enumerate()
            .filter(move |&(from, _)| to.is_some_and(|to| self.reach[from][to]))
            .map(|(_, name)| name)
    }

    pub fn len(&self) -> usize {
        self.reach.iter().flatten().filter(|&&r| r).count()
    }
}

/// Returns an equivalent grammar without unit productions.
///
/// For every pair (A, B), each non-unit production `B -> α` is copied as
/// `A -> α`. Copies follow the order of the original productions, so a
/// grammar without unit productions comes back unchanged.
pub fn eliminate_unit(grammar: &Grammar) -> Grammar {
    let pairs = UnitPairs::compute(grammar);

    let mut productions = IndexSet::new();
    for production in grammar.productions().iter().filter(|p| !p.is_unit()) {
        for from in pairs.derivers_of(production.left().key()) {
            productions.insert(production.with_left(from));
        }
    }

    debug!(
        pairs = pairs.len(),
        before = grammar.production_count(),
        after = productions.len(),
        "eliminated unit productions"
    );
    Grammar::from_productions(grammar.start().key(), productions)
}
