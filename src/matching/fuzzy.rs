use strsim::damerau_levenshtein;

use super::weights::PassConfig;
use crate::normalize::fold;
use crate::CandidateRecord;

/// Approximate substring scorer. Scores live in `[0, 1]`, lower is
/// better. Implementations treat unmatched or blank text as `None`,
/// never as an error; a ranked list must not fail because one field was
/// malformed.
pub trait FuzzyMatcher: Send + Sync {
    /// Best qualifying distance for `query` within `text`, or `None`
    /// when no window scores at or below `threshold`.
    fn score(&self, query: &str, text: &str, threshold: f64, distance: usize) -> Option<f64>;
}

/// Damerau-Levenshtein over a query-length window slid across the field.
///
/// A window starting at character `i` costs
/// `edit_errors / query_len + i / distance`, so matches deep inside long
/// fields decay toward the threshold instead of counting as exact.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowedDamerau;

impl FuzzyMatcher for WindowedDamerau {
    fn score(&self, query: &str, text: &str, threshold: f64, distance: usize) -> Option<f64> {
        let query = fold(query);
        let text = fold(text);
        if query.is_empty() || text.is_empty() {
            return None;
        }

        let text_chars: Vec<char> = text.chars().collect();
        let query_len = query.chars().count();
        let distance = distance.max(1) as f64;

        let mut best: Option<f64> = None;
        for start in 0..text_chars.len() {
            let offset_cost = start as f64 / distance;
            // Every later window starts at least this far out; once the
            // offset alone exceeds the threshold nothing can qualify.
            if offset_cost > threshold {
                break;
            }

            let end = (start + query_len).min(text_chars.len());
            let window: String = text_chars[start..end].iter().collect();
            let errors = damerau_levenshtein(&query, &window);
            let score = errors as f64 / query_len as f64 + offset_cost;
            if score <= threshold && best.map_or(true, |b| score < b) {
                best = Some(score);
            }
        }
        best
    }
}

/// One pool hit from a single fuzzy pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassHit {
    pub index: usize,
    pub score: f64,
}

/// Runs one weighted pass over the pool. Per candidate, every configured
/// field is scored against `query`; the lowest weighted distance wins
/// and candidates with no qualifying field are omitted. Missing fields
/// simply fail to match.
pub fn search_pass(
    matcher: &dyn FuzzyMatcher,
    pool: &[CandidateRecord],
    query: &str,
    pass: &PassConfig,
) -> Vec<PassHit> {
    let mut hits = Vec::new();
    for (index, candidate) in pool.iter().enumerate() {
        let mut best: Option<f64> = None;
        for weighted in pass.fields {
            let Some(text) = candidate.field_text(weighted.field) else {
                continue;
            };
            let Some(raw) = matcher.score(query, text, pass.threshold, pass.distance) else {
                continue;
            };
            let score = raw / weighted.weight;
            if best.map_or(true, |b| score < b) {
                best = Some(score);
            }
        }
        if let Some(score) = best {
            hits.push(PassHit { index, score });
        }
    }
    hits
}
