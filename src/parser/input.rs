/*
    Splits the sentence to recognise into tokens
*/

/// Whitespace-separated input is split on whitespace. Input without any
/// whitespace is scanned character by character: runs of letters and digits
/// form one token and every other character is a token of its own, so
/// `id+id*id` becomes `id + id * id`.
pub fn tokenize(input: &str) -> Vec<String> {
    let input = input.trim();

    if input.chars().any(char::is_whitespace) {
        input.split_whitespace().map(str::to_string).collect()
    } else {
        scan(input)
    }
}

fn scan(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in input.chars() {
        if c.is_alphanumeric() {
            current.push(c);
        } else {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            tokens.push(c.to_string());
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
