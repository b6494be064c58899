use std::fmt::Display;

use itertools::Itertools;

// Spellings of the empty right side in grammar files
pub const EPSILON_SPELLINGS: [&str; 3] = ["e", "ε", "epsilon"];

/// The base unit in a grammar rule.
///
/// A terminal and a nonterminal never share a spelling, so the spelling alone
/// is used as the symbol's key in every index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
}

impl Symbol {
    pub fn terminal(value: impl Into<String>) -> Self {
        Symbol::Terminal(value.into())
    }

    pub fn nonterminal(value: impl Into<String>) -> Self {
        Symbol::NonTerminal(value.into())
    }

    /// Classifies a grammar token: nonterminals start with an uppercase ASCII
    /// letter, everything else (words, digits, punctuation) is a terminal.
    pub fn classify(token: &str) -> Self {
        if is_nonterminal_spelling(token) {
            Symbol::nonterminal(token)
        } else {
            Symbol::terminal(token)
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Symbol::Terminal(value) | Symbol::NonTerminal(value) => value,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }
}

pub fn is_nonterminal_spelling(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

// Renders a right side, `ε` when empty
pub fn symbols_to_string(symbols: &[Symbol]) -> String {
    if symbols.is_empty() {
        "ε".to_string()
    } else {
        symbols.iter().join(" ")
    }
}
