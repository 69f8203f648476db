//! Turns raw text into word tokens.
//!
//! Punctuation is the ASCII punctuation class
//! (``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``). Everything else, including
//! non-ASCII letters and symbols, is left in place. Case is never changed.
//!
//! Tokens are separated by Unicode whitespace and by the ASCII information
//! separators U+001C..=U+001F.

use crate::Token;

/// Removes every ASCII punctuation character from `text`.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Splits `text` on runs of whitespace, dropping empty tokens.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split(is_separator)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strips punctuation, then tokenizes.
pub fn normalize(text: &str) -> Vec<Token> {
    tokenize(&strip_punctuation(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn strips_ascii_punctuation_only() {
        assert_eq!(strip_punctuation("The cat sat. The cat ran!"), "The cat sat The cat ran");
        assert_eq!(strip_punctuation("don't-stop (now)"), "dontstop now");
        assert_eq!(strip_punctuation("«café» — naïve"), "«café» — naïve");
        assert_eq!(strip_punctuation("a\tb\nc"), "a\tb\nc");
    }

    #[test]
    fn tokenize_splits_on_whitespace_runs() {
        assert_eq!(tokenize("  one \t two\n\nthree  "), vec!["one", "two", "three"]);
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t ").is_empty());
    }

    #[test]
    fn information_separators_split_tokens() {
        assert_eq!(tokenize("a\u{1c}b\u{1d}c\u{1e}\u{1f}d"), vec!["a", "b", "c", "d"]);
        assert_eq!(normalize("end.\u{1f}start"), vec!["end", "start"]);
    }

    #[test]
    fn normalize_example_sentence() {
        assert_eq!(
            normalize("The cat sat. The cat ran!"),
            vec!["The", "cat", "sat", "The", "cat", "ran"]
        );
    }

    #[test]
    fn lone_punctuation_disappears() {
        assert_eq!(normalize("hello , world -- !"), vec!["hello", "world"]);
    }

    #[test]
    fn tokens_never_contain_punctuation_and_counts_add_up() {
        let text = "It was the best of times, it was the worst of times; \
                    it was the age of wisdom... \"it was\" the age of foolishness!?";
        let tokens = normalize(text);

        assert!(tokens
            .iter()
            .all(|t| !t.is_empty() && !t.chars().any(|c| c.is_ascii_punctuation())));

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for t in &tokens {
            *counts.entry(t.as_str()).or_default() += 1;
        }
        assert_eq!(counts.values().sum::<usize>(), tokens.len());
    }
}
