/*
    This module parses grammar files
*/

pub mod input;
mod lexer;
mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use itertools::Itertools;
use tracing::{debug, warn};

use crate::grammar::*;
use crate::error_handling::*;
use lexer::*;
use verifier::verify_rules;

#[derive(Debug)]
pub enum FormatErrorType {
    // A rule line has no `->`
    MissingArrow,
    // A rule line has more than one `->`
    UnexpectedArrow,
    // Nothing before the `->`
    EmptyLeftSide,
    // More than one symbol before the `->`
    MultipleLeftSymbols,
    // The rule defines something other than a nonterminal
    NonTerminalExpected(String),
    // Nothing after the `->`
    EmptyRightSide,
    // An alternative between `|` separators is empty
    EmptyAlternative,
    // A nonterminal is used but never defined (reported as a warning)
    UndefinedNonTerminal(String),
    // The file holds no rule at all
    NoProductions,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for FormatErrorType {}

impl PartialEq for FormatErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FormatErrorType::FileError(a), FormatErrorType::FileError(b)) => a.kind() == b.kind(),
            (FormatErrorType::NonTerminalExpected(a), FormatErrorType::NonTerminalExpected(b)) => a == b,
            (FormatErrorType::UndefinedNonTerminal(a), FormatErrorType::UndefinedNonTerminal(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for FormatErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatErrorType::MissingArrow => write!(f, "Expected `{}` after the rule's nonterminal", ARROW),
            FormatErrorType::UnexpectedArrow => write!(f, "Unexpected second `{}`", ARROW),
            FormatErrorType::EmptyLeftSide => write!(f, "Missing nonterminal before `{}`", ARROW),
            FormatErrorType::MultipleLeftSymbols => write!(f, "Only one nonterminal may appear before `{}`", ARROW),
            FormatErrorType::NonTerminalExpected(token) => write!(f, "Tried to define `{}`, which is not a nonterminal", token),
            FormatErrorType::EmptyRightSide => write!(f, "Missing right side after `{}`", ARROW),
            FormatErrorType::EmptyAlternative => write!(f, "Empty alternative (write `ε` for the empty string)"),
            FormatErrorType::UndefinedNonTerminal(nonterminal) => write!(f, "Could not find definition for `{}`", nonterminal),
            FormatErrorType::NoProductions => write!(f, "No productions found"),
            FormatErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type FormatError = Error<FormatErrorType>;
pub type FormatErrors = Errors<FormatErrorType>;

fn io_error(error: std::io::Error, file: &Path) -> FormatError {
    FormatError {
        location: Location::file(file),
        error: FormatErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, FormatErrorType>;
pub type LineResult<T> = std::result::Result<T, FormatError>;
pub type FileResult<T> = std::result::Result<T, FormatErrors>;

#[derive(PartialEq, Debug)]
pub(crate) struct Rule {
    symbol: String,
    rewrite: Vec<Vec<Symbol>>,
    location: Location
}

fn parse_alternative(tokens: &[Token]) -> Result<Vec<Symbol>> {
    if let [Token::Word(word)] = tokens {
        if EPSILON_SPELLINGS.contains(&word.as_str()) {
            return Ok(Vec::new());
        }
    }
    if tokens.is_empty() {
        return Err(FormatErrorType::EmptyAlternative);
    }

    tokens.iter().map(|t| match t {
        Token::Arrow => Err(FormatErrorType::UnexpectedArrow),
        Token::Or => Err(FormatErrorType::EmptyAlternative),
        Token::Word(word) => Ok(Symbol::classify(word))
    }).collect()
}

fn parse_rewrite(tokens: &[Token]) -> Result<Vec<Vec<Symbol>>> {
    if tokens.is_empty() {
        return Err(FormatErrorType::EmptyRightSide);
    }
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_left_side(tokens: &[Token]) -> Result<String> {
    match tokens {
        [] => Err(FormatErrorType::EmptyLeftSide),
        [Token::Word(word)] if is_nonterminal_spelling(word) => Ok(word.clone()),
        [Token::Word(word)] => Err(FormatErrorType::NonTerminalExpected(word.clone())),
        [Token::Or] => Err(FormatErrorType::NonTerminalExpected("|".to_string())),
        _ => Err(FormatErrorType::MultipleLeftSymbols),
    }
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let arrows = tokens.iter().positions(|t| *t == Token::Arrow).collect_vec();
    let arrow = match arrows.as_slice() {
        [] => return Err(FormatErrorType::MissingArrow),
        [arrow] => *arrow,
        _ => return Err(FormatErrorType::UnexpectedArrow),
    };

    let symbol = parse_left_side(&tokens[..arrow])?;
    let rewrite = parse_rewrite(&tokens[arrow + 1..])?;

    return Ok(Rule {
        symbol,
        rewrite,
        location
    });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    parse_line(&lex_line(line), location.clone())
        .map_err(|error| FormatError { location, error })
}

fn is_rule_line(line: &String) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#') && !line.starts_with("//")
}

// Returns an iterator over the lines of a file, with the io errors wrapped
// in FormatError and enumerated
fn file_line_nums<'a>(file: File, path: &'a Path) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path)))
        .enumerate()
        .map(|(num, line)| (num + 1, line))
}

fn grammar_from_rules(rules: Vec<Rule>, path: &Path) -> FileResult<Grammar> {
    let Some(first) = rules.first() else {
        return Err(vec![FormatError {
            location: Location::file(path),
            error: FormatErrorType::NoProductions
        }]);
    };

    for finding in verify_rules(&rules) {
        warn!("{}", finding);
    }

    let mut grammar = Grammar::new(first.symbol.clone());
    for rule in rules {
        for alternative in rule.rewrite {
            grammar.add_production(Production::new(rule.symbol.clone(), alternative));
        }
    }

    debug!(
        "loaded {} productions over {} nonterminals from {}",
        grammar.production_count(),
        grammar.nonterminal_count(),
        path.display()
    );
    return Ok(grammar);
}

fn parse_lines(lines: impl Iterator<Item = (usize, LineResult<String>)>, path: &Path) -> FileResult<Grammar> {
    let parsed_lines = lines
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line_res)| {
            line_res.and_then(|line| parse_lex_line(&line, Location::new(path, num)))
        });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }

    return grammar_from_rules(rules, path);
}

/// Loads a grammar file. Every malformed line is reported, not just the first.
pub fn parse_file(path: impl AsRef<Path>) -> FileResult<Grammar> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| vec![io_error(e, path)])?;
    parse_lines(file_line_nums(file, path), path)
}

/// Loads a grammar held in memory, e.g. one embedded in a test.
pub fn parse_str(text: &str) -> FileResult<Grammar> {
    let lines = text.lines().enumerate().map(|(num, line)| (num + 1, Ok(line.to_string())));
    parse_lines(lines, Path::new("<string>"))
}

#[cfg(test)]
mod tests {
    use std::iter::zip;
    use std::path::PathBuf;

    use super::*;

    fn s_nonterminal(text: &str) -> Symbol {
        Symbol::nonterminal(text)
    }

    fn s_terminal(text: &str) -> Symbol {
        Symbol::terminal(text)
    }

    fn here() -> Location {
        Location::new("test.cfg", 1)
    }

    #[test]
    fn parse_normal_alternative() {
        let lines = vec![
            "Det N with",
            "e",
            "epsilon",
            "ε",
            "a e b",
        ];
        let answers = vec![
            vec![s_nonterminal("Det"), s_nonterminal("N"), s_terminal("with")],
            vec![],
            vec![],
            vec![],
            vec![s_terminal("a"), s_terminal("e"), s_terminal("b")],
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(parse_alternative(&lex_line(line)).unwrap(), answer);
        }
    }

    #[test]
    fn parse_malformed_alternative() {
        assert_eq!(parse_alternative(&[]), Err(FormatErrorType::EmptyAlternative));
        assert_eq!(parse_alternative(&[Token::Arrow]), Err(FormatErrorType::UnexpectedArrow));
    }

    #[test]
    fn parse_normal_line() {
        let lexed = lex_line("VP -> V NP | eats | e");

        let answer = Rule {
            symbol: "VP".to_string(),
            rewrite: vec![
                vec![s_nonterminal("V"), s_nonterminal("NP")],
                vec![s_terminal("eats")],
                vec![],
            ],
            location: here()
        };

        assert_eq!(parse_line(&lexed, here()), Ok(answer));
    }

    #[test]
    fn parse_malformed_line() {
        let cases = vec![
            ("S NP VP", FormatErrorType::MissingArrow),
            ("S -> A -> B", FormatErrorType::UnexpectedArrow),
            ("-> a", FormatErrorType::EmptyLeftSide),
            ("S T -> a", FormatErrorType::MultipleLeftSymbols),
            ("s -> a", FormatErrorType::NonTerminalExpected("s".to_string())),
            ("| -> a", FormatErrorType::NonTerminalExpected("|".to_string())),
            ("S ->", FormatErrorType::EmptyRightSide),
            ("S -> a | | b", FormatErrorType::EmptyAlternative),
            ("S -> a |", FormatErrorType::EmptyAlternative),
        ];

        for (line, error) in cases {
            assert_eq!(parse_line(&lex_line(line), here()), Err(error), "parsing {:?}", line);
        }
    }

    #[test]
    fn parse_text() {
        let grammar = parse_str("
            # arithmetic
            E -> E + T | T
            // terms
            T -> id
        ").unwrap();

        assert_eq!(grammar.start(), &s_nonterminal("E"));
        assert_eq!(grammar.production_count(), 3);
        assert_eq!(grammar.to_string(), "E -> E + T | T\nT -> id\n");
    }

    #[test]
    fn parse_text_without_rules() {
        assert_eq!(parse_str("# nothing here\n\n").unwrap_err(), vec![FormatError {
            location: Location::file("<string>"),
            error: FormatErrorType::NoProductions
        }]);
    }

    #[test]
    fn undefined_nonterminals_are_not_fatal() {
        let grammar = parse_str("S -> A B\nA -> a").unwrap();
        assert_eq!(grammar.production_count(), 2);
        assert!(grammar.is_nonterminal("B"));
    }

    #[test]
    fn parse_normal_file() {
        let example_path = PathBuf::from("example_data/english.cfg");
        let grammar = parse_file(&example_path).unwrap();

        assert_eq!(grammar.start(), &s_nonterminal("S"));
        assert_eq!(grammar.nonterminals().collect_vec(), vec!["S", "NP", "VP", "PP", "V", "P", "Det", "N"]);
        assert!(grammar.has_production(&Production::new("VP", vec![s_nonterminal("VP"), s_nonterminal("PP")])));
        assert!(grammar.has_production(&Production::new("N", vec![s_terminal("fork")])));
        assert_eq!(grammar.first_non_cnf().map(ToString::to_string), Some("VP -> V NP PP".to_string()));
    }

    #[test]
    fn parse_malformed_file() {
        let example_path = PathBuf::from("example_data/malformed.cfg");
        let errors = parse_file(&example_path).unwrap_err();

        assert_eq!(errors, vec![
            FormatError {
                location: Location::new(&example_path, 3),
                error: FormatErrorType::MissingArrow
            },
            FormatError {
                location: Location::new(&example_path, 5),
                error: FormatErrorType::NonTerminalExpected("np".to_string())
            },
            FormatError {
                location: Location::new(&example_path, 7),
                error: FormatErrorType::EmptyAlternative
            },
        ]);
    }

    #[test]
    fn parse_missing_file() {
        let example_path = PathBuf::from("example_data/does_not_exist.cfg");
        assert_eq!(parse_file(&example_path).unwrap_err(), vec![FormatError {
            location: Location::file(&example_path),
            error: FormatErrorType::FileError(std::io::ErrorKind::NotFound.into())
        }]);
    }
}
