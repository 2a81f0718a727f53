use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::stem::{Stemmer, StemmerKind};

/// Anything that is not a letter, digit or whitespace becomes a space.
static RE_NON_TERM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]+").unwrap());

/// NFKC-fold, lowercase and trim free text before any comparison.
/// Full-width romaji and compatibility forms collapse here.
pub fn fold(input: &str) -> String {
    input.nfkc().collect::<String>().trim().to_lowercase()
}

/// Bare terms of folded text: punctuation turns into whitespace,
/// consecutive whitespace collapses, blank input yields no terms.
pub fn split_terms(input: &str) -> Vec<String> {
    let folded = fold(input);
    RE_NON_TERM
        .replace_all(&folded, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Term pipeline with the stemming strategy fixed at construction.
pub struct TermNormalizer {
    stemmer: Box<dyn Stemmer>,
}

impl TermNormalizer {
    pub fn new(kind: StemmerKind) -> Self {
        Self {
            stemmer: kind.build(),
        }
    }

    /// Stemmed terms in input order.
    pub fn terms(&self, text: &str) -> Vec<String> {
        split_terms(text)
            .iter()
            .map(|term| self.stemmer.stem(term))
            .collect()
    }

    /// Stemmed term set for overlap checks.
    pub fn term_set(&self, text: &str) -> HashSet<String> {
        split_terms(text)
            .iter()
            .map(|term| self.stemmer.stem(term))
            .collect()
    }
}
