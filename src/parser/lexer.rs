pub const ARROW: &str = "->";

#[derive(PartialEq, Debug)]
pub enum Token {
    Arrow,
    Or,
    Word(String)
}

// A word runs until whitespace, `|` or the start of an arrow
fn split_word(text: &str) -> (&str, &str) {
    let end = text
        .char_indices()
        .find(|&(i, c)| c.is_whitespace() || c == '|' || text[i..].starts_with(ARROW))
        .map_or(text.len(), |(i, _)| i);
    text.split_at(end)
}

pub fn lex_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if rest.starts_with(ARROW) {
            rest = &rest[ARROW.len()..];
            tokens.push(Token::Arrow);
        } else if c == '|' {
            rest = &rest[1..];
            tokens.push(Token::Or);
        } else if c.is_whitespace() {
            rest = &rest[c.len_utf8()..];
        } else {
            let (word, tail) = split_word(rest);
            tokens.push(Token::Word(word.to_string()));
            rest = tail;
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    fn word(text: &str) -> Token {
        Token::Word(text.to_string())
    }

    #[test]
    fn split_words() {
        let lines = vec![
            "alpha bravo",
            "delta",
            "gamma|rest",
            "x->y",
            "a-b c",
        ];
        // (word, rest of the line)
        let answers = vec![
            ("alpha", " bravo"),
            ("delta", ""),
            ("gamma", "|rest"),
            ("x", "->y"),
            ("a-b", " c"),
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(split_word(line), answer);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "NP -> Det N | she",
            "A->a|e",
            "E -> E + T | ( E ) | - E",
        ];
        let answers = vec![
            vec![word("NP"), Token::Arrow, word("Det"), word("N"), Token::Or, word("she")],
            vec![word("A"), Token::Arrow, word("a"), Token::Or, word("e")],
            vec![
                word("E"), Token::Arrow,
                word("E"), word("+"), word("T"), Token::Or,
                word("("), word("E"), word(")"), Token::Or,
                word("-"), word("E"),
            ],
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line), answer)
        }
    }

    #[test]
    fn lex_unicode_epsilon() {
        assert_eq!(lex_line("S -> ε"), vec![word("S"), Token::Arrow, word("ε")]);
    }

    #[test]
    fn lex_blank_line() {
        assert!(lex_line("   \t ").is_empty());
    }
}
