use std::fmt::Display;

use super::symbol::{symbols_to_string, Symbol};

/// A rewrite `left -> right`. An empty right side is an ε-production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    left: Symbol,
    right: Vec<Symbol>,
}

impl Production {
    /// The left side is always a nonterminal.
    pub fn new(left: impl Into<String>, right: Vec<Symbol>) -> Self {
        Production {
            left: Symbol::NonTerminal(left.into()),
            right,
        }
    }

    /// Same right side, rewritten from another nonterminal.
    pub fn with_left(&self, left: &str) -> Self {
        Production::new(left, self.right.clone())
    }

    pub fn left(&self) -> &Symbol {
        &self.left
    }

    pub fn right(&self) -> &[Symbol] {
        &self.right
    }

    pub fn is_epsilon(&self) -> bool {
        self.right.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        matches!(self.right.as_slice(), [Symbol::NonTerminal(_)])
    }

    pub fn is_single_terminal(&self) -> bool {
        matches!(self.right.as_slice(), [Symbol::Terminal(_)])
    }

    /// `A -> a` or `A -> B C`
    pub fn is_cnf(&self) -> bool {
        match self.right.as_slice() {
            [Symbol::Terminal(_)] => true,
            [Symbol::NonTerminal(_), Symbol::NonTerminal(_)] => true,
            _ => false,
        }
    }

    pub fn has_terminal(&self) -> bool {
        self.right.iter().any(Symbol::is_terminal)
    }

    pub fn mentions(&self, key: &str) -> bool {
        self.left.key() == key || self.right.iter().any(|s| s.key() == key)
    }

    /// Every symbol of the production, left side first.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        std::iter::once(&self.left).chain(self.right.iter())
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.left, symbols_to_string(&self.right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nt(s: &str) -> Symbol {
        Symbol::nonterminal(s)
    }

    fn t(s: &str) -> Symbol {
        Symbol::terminal(s)
    }

    #[test]
    fn classifications() {
        let epsilon = Production::new("A", vec![]);
        assert!(epsilon.is_epsilon());
        assert!(!epsilon.is_cnf());

        let unit = Production::new("A", vec![nt("B")]);
        assert!(unit.is_unit());
        assert!(!unit.is_cnf());

        let terminal = Production::new("A", vec![t("a")]);
        assert!(!terminal.is_unit());
        assert!(terminal.is_single_terminal());
        assert!(terminal.is_cnf());

        assert!(Production::new("A", vec![nt("B"), nt("C")]).is_cnf());
        assert!(!Production::new("A", vec![t("a"), nt("C")]).is_cnf());
        assert!(!Production::new("A", vec![nt("B"), nt("C"), nt("D")]).is_cnf());
    }

    #[test]
    fn display() {
        assert_eq!(Production::new("S", vec![nt("NP"), nt("VP")]).to_string(), "S -> NP VP");
        assert_eq!(Production::new("S", vec![]).to_string(), "S -> ε");
    }

    #[test]
    fn mentions_either_side() {
        let p = Production::new("VP", vec![nt("V"), t("quickly")]);
        assert!(p.mentions("VP"));
        assert!(p.mentions("quickly"));
        assert!(!p.mentions("NP"));
        assert_eq!(p.with_left("S").to_string(), "S -> V quickly");
    }
}
