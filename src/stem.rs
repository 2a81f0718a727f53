use std::str::FromStr;

use rust_stemmers::Algorithm;
use thiserror::Error;

/// Reduces a term to an approximate root form so related word forms
/// ("developer", "development") compare equal. The strategy is fixed at
/// engine construction; the hot path never branches on it.
pub trait Stemmer: Send + Sync {
    fn stem(&self, term: &str) -> String;
}

/// Snowball English stemmer backed by `rust-stemmers`.
///
/// The algorithm is only defined over ASCII letters, so any term carrying
/// digits or non-ASCII characters passes through untouched.
pub struct EnglishStemmer {
    inner: rust_stemmers::Stemmer,
}

impl EnglishStemmer {
    pub fn new() -> Self {
        Self {
            inner: rust_stemmers::Stemmer::create(Algorithm::English),
        }
    }
}

impl Default for EnglishStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for EnglishStemmer {
    fn stem(&self, term: &str) -> String {
        if term.chars().all(|c| c.is_ascii_alphabetic()) {
            self.inner.stem(term).into_owned()
        } else {
            term.to_string()
        }
    }
}

/// Recognized suffixes, longest first so "developers" loses "ers" rather
/// than stopping at "er".
const SUFFIXES: [&str; 8] = ["ment", "tion", "ions", "ing", "ers", "er", "ed", "ly"];

/// Stems shorter than this are degenerate; leave the term alone instead.
const MIN_STEM_LEN: usize = 2;

/// Dependency-free fallback: strips at most one recognized English suffix
/// in a single pass. "singing" becomes "sing", never "s".
pub struct SuffixStemmer;

impl Stemmer for SuffixStemmer {
    fn stem(&self, term: &str) -> String {
        for suffix in SUFFIXES {
            if let Some(stripped) = term.strip_suffix(suffix) {
                if stripped.chars().count() >= MIN_STEM_LEN {
                    return stripped.to_string();
                }
            }
        }
        term.to_string()
    }
}

/// Stemming strategy selector, resolved once at startup (`SB_STEMMER`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StemmerKind {
    /// Snowball English via `rust-stemmers`.
    #[default]
    Porter,
    /// Single-pass suffix trimming.
    Suffix,
}

impl StemmerKind {
    pub fn build(self) -> Box<dyn Stemmer> {
        match self {
            StemmerKind::Porter => Box::new(EnglishStemmer::new()),
            StemmerKind::Suffix => Box::new(SuffixStemmer),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown stemmer kind: {0} (expected \"porter\" or \"suffix\")")]
pub struct ParseStemmerKindError(String);

impl FromStr for StemmerKind {
    type Err = ParseStemmerKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "porter" | "english" | "snowball" => Ok(StemmerKind::Porter),
            "suffix" | "fallback" => Ok(StemmerKind::Suffix),
            other => Err(ParseStemmerKindError(other.to_string())),
        }
    }
}
