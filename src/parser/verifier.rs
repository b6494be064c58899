use indexmap::IndexSet;

use crate::grammar::Symbol::NonTerminal;
use super::FormatErrorType::UndefinedNonTerminal;
use super::{FormatError, FormatErrors, Location, Rule};

fn get_alternative_undefined_symbols(rewrite: &[crate::grammar::Symbol], location: &Location, defined: &IndexSet<&str>) -> FormatErrors {
    // Filter out everything but nonterminals, then keep the ones no rule defines
    rewrite.iter()
        .filter_map(|symbol| match symbol {
            NonTerminal(symbol) => Some(symbol),
            _ => None
        })
        .filter(|symbol| !defined.contains(symbol.as_str()))
        .map(|symbol_text| FormatError {
            location: location.to_owned(),
            error: UndefinedNonTerminal(symbol_text.to_owned())
        })
        .collect()
}

fn get_rule_undefined_symbols(rule: &Rule, defined: &IndexSet<&str>) -> FormatErrors {
    rule.rewrite.iter()
        .flat_map(|alternative| get_alternative_undefined_symbols(alternative, &rule.location, defined))
        .collect()
}

/// Nonterminals used on a right side that no rule defines.
///
/// These are legal (such symbols are simply non-generating and disappear
/// during normalization) so callers report them as warnings.
pub fn verify_rules(rules: &[Rule]) -> FormatErrors {
    let defined: IndexSet<&str> = rules.iter().map(|rule| rule.symbol.as_str()).collect();

    rules.iter()
        .flat_map(|rule| get_rule_undefined_symbols(rule, &defined))
        .collect()
}
