/*
    This module generates random sentences of a grammar
*/

use std::collections::HashMap;
use std::fmt::Display;

use rand::prelude::*;
use tracing::trace;

use crate::grammar::*;

pub const DEFAULT_DEPTH_BUDGET: usize = 12;

#[derive(Debug, PartialEq)]
pub enum GenerateError {
    // The symbol derives no string of terminals at all
    NonGenerating(String),
}

impl Display for GenerateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateError::NonGenerating(symbol) => write!(f, "`{}` does not derive any sentence", symbol),
        }
    }
}

impl std::error::Error for GenerateError {}

pub type GenResult = Result<Vec<String>, GenerateError>;

/// Picks random derivations of a grammar.
///
/// Productions are chosen uniformly until the depth budget is spent; below
/// it only productions of minimal height are taken, so every derivation ends.
/// Productions using non-generating symbols are never chosen.
pub struct Sampler<'g> {
    grammar: &'g Grammar,
    // Height of the shortest derivation tree of each generating nonterminal
    heights: HashMap<&'g str, usize>,
    depth_budget: usize,
}

impl<'g> Sampler<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Sampler {
            grammar,
            heights: minimal_heights(grammar),
            depth_budget: DEFAULT_DEPTH_BUDGET,
        }
    }

    pub fn with_depth_budget(mut self, depth_budget: usize) -> Self {
        self.depth_budget = depth_budget;
        self
    }

    /// Height of the smallest tree for `production`, if it has one.
    fn production_height(&self, production: &Production) -> Option<usize> {
        production_height(&self.heights, production)
    }

    pub fn sample(&self, rng: &mut impl Rng) -> GenResult {
        self.sample_from(self.grammar.start().key(), rng)
    }

    pub fn sample_from(&self, nonterminal: &str, rng: &mut impl Rng) -> GenResult {
        if !self.heights.contains_key(nonterminal) {
            return Err(GenerateError::NonGenerating(nonterminal.to_string()));
        }

        let mut sentence = Vec::new();
        self.expand(nonterminal, 0, rng, &mut sentence)?;
        trace!(symbol = nonterminal, sentence = %sentence.join(" "), "sampled");
        Ok(sentence)
    }

    fn expand(&self, nonterminal: &str, depth: usize, rng: &mut impl Rng, sentence: &mut Vec<String>) -> Result<(), GenerateError> {
        let choices = self
            .grammar
            .productions_for(&Symbol::nonterminal(nonterminal))
            .filter_map(|p| self.production_height(p).map(|height| (p, height)))
            .collect::<Vec<_>>();

        let choices = if depth < self.depth_budget {
            choices
        } else {
            let lowest = choices.iter().map(|&(_, height)| height).min().unwrap_or(0);
            choices.into_iter().filter(|&(_, height)| height == lowest).collect()
        };

        let Some(&(production, _)) = choices.choose(rng) else {
            return Err(GenerateError::NonGenerating(nonterminal.to_string()));
        };

        for symbol in production.right() {
            match symbol {
                Symbol::Terminal(t) => sentence.push(t.clone()),
                Symbol::NonTerminal(n) => self.expand(n, depth + 1, rng, sentence)?,
            }
        }
        Ok(())
    }
}

fn production_height(heights: &HashMap<&str, usize>, production: &Production) -> Option<usize> {
    production
        .right()
        .iter()
        .map(|symbol| match symbol {
            Symbol::Terminal(_) => Some(0),
            Symbol::NonTerminal(n) => heights.get(n.as_str()).copied(),
        })
        .try_fold(0, |highest, height| height.map(|h| highest.max(h)))
        .map(|highest| highest + 1)
}

// Least fixpoint of the minimal tree heights; only generating nonterminals
// end up in the map
fn minimal_heights(grammar: &Grammar) -> HashMap<&str, usize> {
    let mut heights: HashMap<&str, usize> = HashMap::new();

    let mut changed = true;
    while changed {
        changed = false;
        for production in grammar.productions() {
            let Some(height) = production_height(&heights, production) else {
                continue;
            };
            let left = production.left().key();
            if heights.get(left).map_or(true, |&known| height < known) {
                heights.insert(left, height);
                changed = true;
            }
        }
    }

    heights
}
