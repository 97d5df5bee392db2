use crate::error::{ArchivistError, Result};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Literal(String),
    Number,
    Name,
}

/// A parsed filename template.
///
/// The format string is a run of literal text with a `{number}` placeholder
/// (required, exactly once) and an optional `{name}` placeholder. The same
/// token sequence drives both matching of existing filenames and rendering
/// of the next one, so no characters ever need escaping.
#[derive(Debug, Clone)]
pub struct NameTemplate {
    tokens: Vec<Token>,
}

impl NameTemplate {
    pub fn parse(format: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars();

        while let Some(ch) = chars.next() {
            if ch != '{' {
                literal.push(ch);
                continue;
            }

            let mut placeholder = String::new();
            let mut closed = false;
            for inner in chars.by_ref() {
                if inner == '}' {
                    closed = true;
                    break;
                }
                placeholder.push(inner);
            }
            if !closed {
                return Err(malformed("unclosed '{' placeholder"));
            }

            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            match placeholder.as_str() {
                "number" => tokens.push(Token::Number),
                "name" => tokens.push(Token::Name),
                other => return Err(malformed(format!("unknown placeholder {{{other}}}"))),
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        let numbers = tokens.iter().filter(|token| **token == Token::Number).count();
        if numbers != 1 {
            return Err(malformed("template must contain {number} exactly once"));
        }
        let names = tokens.iter().filter(|token| **token == Token::Name).count();
        if names > 1 {
            return Err(malformed("{name} may appear at most once"));
        }

        Ok(Self { tokens })
    }

    /// Match a complete file stem against the template and return the
    /// captured `{number}` value, or `None` when the stem does not match.
    pub fn match_number(&self, stem: &str) -> Option<u64> {
        match_tokens(&self.tokens, stem).flatten()
    }

    /// Substitute the placeholders and return the rendered stem.
    pub fn render(&self, number: u64, title: &str) -> String {
        self.tokens
            .iter()
            .map(|token| match token {
                Token::Literal(literal) => literal.clone(),
                Token::Number => number.to_string(),
                Token::Name => title.to_string(),
            })
            .collect()
    }
}

fn malformed(message: impl Into<String>) -> ArchivistError {
    ArchivistError::Template {
        message: message.into(),
    }
}

/// Anchored match of `tokens` against the whole of `input`. The outer
/// `Option` is the match result, the inner one the captured number.
/// `{number}` consumes a digit run greedily with backtracking; `{name}`
/// consumes as little as possible.
fn match_tokens(tokens: &[Token], input: &str) -> Option<Option<u64>> {
    let Some((first, rest)) = tokens.split_first() else {
        return input.is_empty().then_some(None);
    };

    match first {
        Token::Literal(literal) => input
            .strip_prefix(literal.as_str())
            .and_then(|tail| match_tokens(rest, tail)),
        Token::Number => {
            let digits = input.chars().take_while(char::is_ascii_digit).count();
            (1..=digits).rev().find_map(|take| {
                let (run, tail) = input.split_at(take);
                match_tokens(rest, tail)?;
                run.parse::<u64>().ok().map(Some)
            })
        }
        Token::Name => (0..=input.len())
            .filter(|split| input.is_char_boundary(*split))
            .find_map(|split| match_tokens(rest, &input[split..])),
    }
}
