/*
    The last two steps towards CNF: terminals are moved into their own
    productions, then long right sides are split into chains of pairs.
*/

use std::collections::HashMap;

use tracing::debug;

use super::SymbolFactory;
use crate::grammar::{Grammar, Production, Symbol};

/// Replaces the terminals of every production that is not already in CNF by
/// a synthetic nonterminal `C<n>` with the single production `C<n> -> t`.
///
/// One synthetic symbol is made per terminal value; their productions are
/// appended after the rewritten ones.
pub fn isolate_terminals(grammar: &Grammar, symbols: &mut SymbolFactory) -> Grammar {
    // terminal -> synthetic nonterminal, in creation order
    let mut isolated: Vec<(String, String)> = Vec::new();
    let mut lookup: HashMap<String, usize> = HashMap::new();

    let mut productions = Vec::with_capacity(grammar.production_count());
    for production in grammar.productions() {
        if production.is_cnf() || !production.has_terminal() {
            productions.push(production.clone());
            continue;
        }

        let right = production
            .right()
            .iter()
            .map(|symbol| match symbol {
                Symbol::NonTerminal(_) => symbol.clone(),
                Symbol::Terminal(value) => {
                    let index = *lookup.entry(value.clone()).or_insert_with(|| {
                        isolated.push((value.clone(), symbols.fresh("C")));
                        isolated.len() - 1
                    });
                    Symbol::nonterminal(isolated[index].1.as_str())
                }
            })
            .collect();
        productions.push(Production::new(production.left().key(), right));
    }

    debug!(isolated = isolated.len(), "isolated terminals");
    productions.extend(
        isolated
            .into_iter()
            .map(|(terminal, nonterminal)| Production::new(nonterminal, vec![Symbol::Terminal(terminal)])),
    );
    Grammar::from_productions(grammar.start().key(), productions)
}

/// Splits every right side longer than two, left to right:
/// `A -> B1 B2 ... Bk` becomes `A -> B1 X1`, `X1 -> B2 X2`, ...,
/// `X(k-2) -> B(k-1) Bk`.
pub fn split_long_productions(grammar: &Grammar, symbols: &mut SymbolFactory) -> Grammar {
    let mut productions = Vec::with_capacity(grammar.production_count());
    let mut split = 0;

    for production in grammar.productions() {
        let right = production.right();
        if right.len() <= 2 {
            productions.push(production.clone());
            continue;
        }

        split += 1;
        let mut left = production.left().key().to_string();
        for symbol in &right[..right.len() - 2] {
            let next = symbols.fresh("X");
            productions.push(Production::new(
                left,
                vec![symbol.clone(), Symbol::nonterminal(next.as_str())],
            ));
            left = next;
        }
        productions.push(Production::new(left, right[right.len() - 2..].to_vec()));
    }

    debug!(split, after = productions.len(), "split long productions");
    Grammar::from_productions(grammar.start().key(), productions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    fn isolate(text: &str) -> Grammar {
        let g = parse_str(text).unwrap();
        let mut symbols = SymbolFactory::for_grammar(&g);
        isolate_terminals(&g, &mut symbols)
    }

    fn split(text: &str) -> Grammar {
        let g = parse_str(text).unwrap();
        let mut symbols = SymbolFactory::for_grammar(&g);
        split_long_productions(&g, &mut symbols)
    }

    #[test]
    fn terminals_get_their_own_productions() {
        let g = isolate("S -> a S b | a b | c");
        assert_eq!(g.to_string(), "S -> C1 S C2 | C1 C2 | c\nC1 -> a\nC2 -> b\n");
    }

    #[test]
    fn one_symbol_per_terminal() {
        let g = isolate("S -> a A a | A a\nA -> a A | x");
        assert_eq!(g.to_string(), "S -> C1 A C1 | A C1\nC1 -> a\nA -> C1 A | x\n");
        assert_eq!(g.productions_generating("a").len(), 1);
    }

    #[test]
    fn cnf_and_terminal_free_productions_pass_through() {
        let text = "S -> A B C | A B | ε\nA -> a\nB -> b\nC -> c";
        assert_eq!(isolate(text), parse_str(text).unwrap());
    }

    #[test]
    fn fresh_names_skip_existing_ones() {
        let g = isolate("S -> a C1 | C2\nC1 -> c\nC2 -> d");
        // C1 and C2 are taken, the counter moves on to C3
        assert!(g.has_production(&Production::new("C3", vec![Symbol::terminal("a")])));
        assert!(g.has_production(&Production::new(
            "S",
            vec![Symbol::nonterminal("C3"), Symbol::nonterminal("C1")]
        )));
    }

    #[test]
    fn long_right_sides_become_chains() {
        let g = split("S -> A B C D | A B\nA -> a\nB -> b\nC -> c\nD -> d");
        assert_eq!(
            g.productions().iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                "S -> A X1", "X1 -> B X2", "X2 -> C D", "S -> A B",
                "A -> a", "B -> b", "C -> c", "D -> d",
            ]
        );
        assert!(g.productions().iter().all(|p| p.right().len() <= 2));
    }

    #[test]
    fn every_long_production_gets_its_own_chain() {
        let g = split("S -> A A A | B B B\nA -> a\nB -> b");
        assert!(g.has_production(&Production::new(
            "X1",
            vec![Symbol::nonterminal("A"), Symbol::nonterminal("A")]
        )));
        assert!(g.has_production(&Production::new(
            "X2",
            vec![Symbol::nonterminal("B"), Symbol::nonterminal("B")]
        )));
        assert!(g.is_cnf());
    }
}
