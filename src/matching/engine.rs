use std::cmp::Ordering;
use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;

use tracing::debug;

use super::fuzzy::{search_pass, FuzzyMatcher, WindowedDamerau};
use super::weights::{
    company_pass, position_pass, COMPANY_ONLY_PENALTY, DUAL_MATCH_FACTOR, WORD_MATCH_SCORE,
};
use crate::config::EngineConfig;
use crate::normalize::TermNormalizer;
use crate::{CandidateRecord, InterviewerApplication, InterviewerStats, InterviewerUser};

/// Search criteria as the HTTP layer hands them over. Blank strings
/// count as absent; two absent criteria mean "browse all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchQuery {
    pub position: Option<String>,
    pub company: Option<String>,
}

/// Which criterion (or combination) produced a candidate's inclusion.
/// Informational only; everything order-relevant is folded into the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Fuzzy hit on the position pass.
    Position,
    /// Stemmed-term overlap only; the fuzzy pass rejected the candidate.
    PositionWord,
    /// Fuzzy hit reinforced by a term overlap.
    PositionPlusWord,
    /// Fuzzy hit on the company pass only.
    Company,
    /// Hit on both the position and company criteria.
    Both,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Position => "position",
            MatchType::PositionWord => "position-word",
            MatchType::PositionPlusWord => "position+word",
            MatchType::Company => "company",
            MatchType::Both => "both",
        }
    }
}

/// One ranked view row: the application, its owning user and stats, plus
/// the priority score (lower ranks first) and the match annotation. Both
/// annotations are `None` on the browse-all path.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub application: InterviewerApplication,
    pub user: InterviewerUser,
    pub stats: InterviewerStats,
    pub score: Option<f64>,
    pub match_type: Option<MatchType>,
}

impl RankedCandidate {
    fn unranked(candidate: &CandidateRecord) -> Self {
        Self {
            stats: candidate.application.stats,
            application: candidate.application.clone(),
            user: candidate.user.clone(),
            score: None,
            match_type: None,
        }
    }

    fn ranked(candidate: &CandidateRecord, score: f64, match_type: MatchType) -> Self {
        Self {
            score: Some(score),
            match_type: Some(match_type),
            ..Self::unranked(candidate)
        }
    }
}

/// Accumulator entry, keyed by application id in the results map.
struct Entry {
    index: usize,
    score: f64,
    match_type: MatchType,
}

/// The interviewer ranking engine. Stateless per invocation; the matcher
/// and stemming strategy are fixed at construction, so a single engine is
/// safe to share across concurrent requests.
pub struct MatchingEngine {
    config: EngineConfig,
    matcher: Box<dyn FuzzyMatcher>,
    normalizer: TermNormalizer,
}

impl MatchingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_matcher(config, Box::new(WindowedDamerau))
    }

    /// Same engine with a caller-supplied scorer.
    pub fn with_matcher(config: EngineConfig, matcher: Box<dyn FuzzyMatcher>) -> Self {
        let normalizer = TermNormalizer::new(config.stemmer);
        Self {
            config,
            matcher,
            normalizer,
        }
    }

    pub fn default() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Ranks the approved-interviewer pool against `query`.
    ///
    /// With no usable criteria the pool comes back in input order without
    /// annotations. Otherwise: a strict fuzzy pass over position text, a
    /// stemmed-term overlap booster, a lenient fuzzy pass over company
    /// text, then a merge where dual matches halve their score and
    /// company-only matches carry a flat penalty. Ties break on rating,
    /// then application id.
    pub fn rank(&self, pool: &[CandidateRecord], query: &MatchQuery) -> Vec<RankedCandidate> {
        let position = present(query.position.as_deref());
        let company = present(query.company.as_deref());

        if position.is_none() && company.is_none() {
            debug!(pool = pool.len(), "no criteria, returning pool order");
            return pool.iter().map(RankedCandidate::unranked).collect();
        }

        let mut entries: HashMap<&str, Entry> = HashMap::new();

        if let Some(position) = position {
            self.run_position_pass(pool, position, &mut entries);
        }
        if let Some(company) = company {
            self.run_company_pass(pool, company, &mut entries);
        }

        let mut ranked: Vec<RankedCandidate> = entries
            .into_values()
            .map(|entry| RankedCandidate::ranked(&pool[entry.index], entry.score, entry.match_type))
            .collect();

        // Ascending score, then rating descending, then application id:
        // ordering never depends on map iteration order.
        ranked.sort_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    b.stats
                        .average_rating
                        .partial_cmp(&a.stats.average_rating)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.application.id.cmp(&b.application.id))
        });

        debug!(results = ranked.len(), "ranking complete");
        ranked
    }

    /// Strict fuzzy pass over role text, then the term-overlap booster.
    fn run_position_pass<'a>(
        &self,
        pool: &'a [CandidateRecord],
        query: &str,
        entries: &mut HashMap<&'a str, Entry>,
    ) {
        let pass = position_pass(self.config.position_threshold);
        let hits = search_pass(self.matcher.as_ref(), pool, query, &pass);
        debug!(hits = hits.len(), "position pass complete");

        for hit in hits {
            entries.insert(
                pool[hit.index].application.id.as_str(),
                Entry {
                    index: hit.index,
                    score: hit.score,
                    match_type: MatchType::Position,
                },
            );
        }

        let query_terms = self.normalizer.term_set(query);
        if query_terms.is_empty() {
            return;
        }

        for (index, candidate) in pool.iter().enumerate() {
            let candidate_terms = self.normalizer.term_set(&profile_text(candidate));
            if query_terms.is_disjoint(&candidate_terms) {
                continue;
            }

            match entries.entry(candidate.application.id.as_str()) {
                MapEntry::Occupied(mut occupied) => {
                    let entry = occupied.get_mut();
                    // Only a plain fuzzy hit gets relabeled; a type that
                    // was upgraded elsewhere keeps its label. The score
                    // only ever improves.
                    if entry.match_type == MatchType::Position {
                        entry.match_type = MatchType::PositionPlusWord;
                    }
                    entry.score = entry.score.min(WORD_MATCH_SCORE);
                }
                MapEntry::Vacant(vacant) => {
                    vacant.insert(Entry {
                        index,
                        score: WORD_MATCH_SCORE,
                        match_type: MatchType::PositionWord,
                    });
                }
            }
        }
    }

    /// Lenient fuzzy pass over employer text; merges into the position
    /// results with the dual-match boost or the company-only penalty.
    fn run_company_pass<'a>(
        &self,
        pool: &'a [CandidateRecord],
        query: &str,
        entries: &mut HashMap<&'a str, Entry>,
    ) {
        let pass = company_pass(self.config.company_threshold);
        let hits = search_pass(self.matcher.as_ref(), pool, query, &pass);
        debug!(hits = hits.len(), "company pass complete");

        for hit in hits {
            match entries.entry(pool[hit.index].application.id.as_str()) {
                MapEntry::Occupied(mut occupied) => {
                    let entry = occupied.get_mut();
                    entry.match_type = MatchType::Both;
                    entry.score *= DUAL_MATCH_FACTOR;
                }
                MapEntry::Vacant(vacant) => {
                    vacant.insert(Entry {
                        index: hit.index,
                        score: hit.score + COMPANY_ONLY_PENALTY,
                        match_type: MatchType::Company,
                    });
                }
            }
        }
    }
}

/// Everything the overlap booster reads from one candidate.
fn profile_text(candidate: &CandidateRecord) -> String {
    let mut text = String::new();
    for part in [
        candidate.application.position.as_deref(),
        candidate.application.qualification.as_deref(),
        candidate.application.company.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(part);
    }
    text
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, position: Option<&str>, company: Option<&str>) -> CandidateRecord {
        CandidateRecord {
            application: InterviewerApplication {
                id: id.into(),
                position: position.map(Into::into),
                company: company.map(Into::into),
                ..InterviewerApplication::default()
            },
            user: InterviewerUser {
                id: format!("u-{id}"),
                ..InterviewerUser::default()
            },
        }
    }

    fn position_query(position: &str) -> MatchQuery {
        MatchQuery {
            position: Some(position.into()),
            company: None,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn no_criteria_returns_pool_order_without_annotations() {
        let engine = MatchingEngine::default();
        let pool = [
            candidate("a", Some("Backend Developer"), Some("Acme")),
            candidate("b", Some("Designer"), None),
            candidate("c", None, Some("Globex")),
        ];

        let results = engine.rank(&pool, &MatchQuery::default());

        assert_eq!(results.len(), 3);
        for (result, original) in results.iter().zip(&pool) {
            assert_eq!(result.application.id, original.application.id);
            assert_eq!(result.score, None);
            assert_eq!(result.match_type, None);
        }
    }

    #[test]
    fn blank_criteria_behave_like_no_criteria() {
        let engine = MatchingEngine::default();
        let pool = [candidate("a", Some("Backend Developer"), None)];
        let query = MatchQuery {
            position: Some("   ".into()),
            company: Some(String::new()),
        };

        let results = engine.rank(&pool, &query);
        assert_eq!(results[0].score, None);
        assert_eq!(results[0].match_type, None);
    }

    #[test]
    fn exact_position_match_scores_best_possible() {
        let engine = MatchingEngine::default();
        let pool = [candidate("a", Some("Software Engineer"), None)];

        let results = engine.rank(&pool, &position_query("Software Engineer"));

        assert_eq!(results.len(), 1);
        let match_type = results[0].match_type.unwrap();
        assert!(match_type.as_str().starts_with("position"));
        assert_close(results[0].score.unwrap(), 0.0);
    }

    #[test]
    fn term_overlap_recovers_candidates_the_strict_pass_rejects() {
        let engine = MatchingEngine::default();
        // "development" sits 8 chars in: 2 errors / 9 + 0.08 = 0.302,
        // just past the 0.3 threshold. The stems still overlap.
        let pool = [candidate("a", Some("Backend Development"), None)];

        let results = engine.rank(&pool, &position_query("Developer"));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_type, Some(MatchType::PositionWord));
        assert_close(results[0].score.unwrap(), WORD_MATCH_SCORE);
    }

    #[test]
    fn fuzzy_hit_with_overlap_is_labeled_position_plus_word() {
        let engine = MatchingEngine::default();
        let pool = [candidate("a", Some("Backend Developer"), None)];

        let results = engine.rank(&pool, &position_query("Developer"));

        assert_eq!(results[0].match_type, Some(MatchType::PositionPlusWord));
        // The fuzzy score (0.08 / 3) already beats the word score and is
        // kept as-is.
        assert_close(results[0].score.unwrap(), 0.08 / 3.0);
    }

    #[test]
    fn word_overlap_caps_weak_fuzzy_scores() {
        let engine = MatchingEngine::default();
        // Qualification-only hit: "development" scores 0.222 against
        // "developer" at weight 1, worse than the word score, so the
        // overlap pulls it down to exactly 0.15.
        let mut weak = candidate("a", None, None);
        weak.application.qualification = Some("Development".into());
        let pool = [weak];

        let results = engine.rank(&pool, &position_query("Developer"));

        assert_eq!(results[0].match_type, Some(MatchType::PositionPlusWord));
        assert_close(results[0].score.unwrap(), WORD_MATCH_SCORE);
    }

    #[test]
    fn dual_match_halves_the_position_score_and_ranks_first() {
        let engine = MatchingEngine::default();
        let pool = [
            candidate("a", Some("Backend Developer"), Some("Acme")),
            candidate("b", Some("Backend Developer"), Some("Globex")),
        ];
        let query = MatchQuery {
            position: Some("developer".into()),
            company: Some("Acme".into()),
        };

        let results = engine.rank(&pool, &query);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].application.id, "a");
        assert_eq!(results[0].match_type, Some(MatchType::Both));
        assert_eq!(results[1].match_type, Some(MatchType::PositionPlusWord));
        // Identical position text, so the dual match is exactly the
        // single match halved, and strictly ahead.
        let single = results[1].score.unwrap();
        assert_close(results[0].score.unwrap(), single * DUAL_MATCH_FACTOR);
        assert!(results[0].score.unwrap() < single);
    }

    #[test]
    fn company_match_upgrades_word_only_entries_to_both() {
        let engine = MatchingEngine::default();
        let pool = [candidate("a", Some("Backend Development"), Some("Acme"))];
        let query = MatchQuery {
            position: Some("Developer".into()),
            company: Some("acme".into()),
        };

        let results = engine.rank(&pool, &query);

        assert_eq!(results[0].match_type, Some(MatchType::Both));
        assert_close(
            results[0].score.unwrap(),
            WORD_MATCH_SCORE * DUAL_MATCH_FACTOR,
        );
    }

    #[test]
    fn company_only_matches_carry_the_flat_penalty() {
        let engine = MatchingEngine::default();
        let pool = [candidate("a", None, Some("Acme"))];
        let query = MatchQuery {
            position: None,
            company: Some("acme".into()),
        };

        let results = engine.rank(&pool, &query);

        assert_eq!(results[0].match_type, Some(MatchType::Company));
        // Raw matcher score is 0.0 here; the penalty is all that remains.
        assert_close(results[0].score.unwrap(), COMPANY_ONLY_PENALTY);
    }

    #[test]
    fn ranking_is_deterministic() {
        let engine = MatchingEngine::default();
        let pool = [
            candidate("a", Some("Backend Developer"), Some("Acme")),
            candidate("b", Some("Frontend Developer"), Some("Globex")),
            candidate("c", Some("Data Engineer"), Some("Acme Labs")),
        ];
        let query = MatchQuery {
            position: Some("developer".into()),
            company: Some("Acme".into()),
        };

        let first = engine.rank(&pool, &query);
        let second = engine.rank(&pool, &query);
        assert_eq!(first, second);
    }

    #[test]
    fn results_are_sorted_by_ascending_score() {
        let engine = MatchingEngine::default();
        let pool = [
            candidate("a", Some("Senior Backend Developer"), None),
            candidate("b", Some("Developer"), None),
            candidate("c", Some("Lead Development Coach"), None),
            candidate("d", None, Some("Developer Tools Inc")),
        ];

        let results = engine.rank(&pool, &position_query("developer"));

        assert!(!results.is_empty());
        for pair in results.windows(2) {
            assert!(pair[0].score.unwrap() <= pair[1].score.unwrap());
        }
    }

    #[test]
    fn empty_pool_yields_empty_results() {
        let engine = MatchingEngine::default();
        let query = MatchQuery {
            position: Some("Y".into()),
            company: Some("X".into()),
        };
        assert!(engine.rank(&[], &query).is_empty());
    }

    #[test]
    fn ties_break_on_rating_then_id() {
        let engine = MatchingEngine::default();
        let mut low = candidate("z", Some("Developer"), None);
        low.application.stats.average_rating = 3.0;
        let mut high = candidate("a", Some("Developer"), None);
        high.application.stats.average_rating = 4.8;
        let mut same_as_low = candidate("m", Some("Developer"), None);
        same_as_low.application.stats.average_rating = 3.0;

        let results = engine.rank(&[low, high, same_as_low], &position_query("Developer"));

        let ids: Vec<_> = results
            .iter()
            .map(|r| r.application.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "m", "z"]);
    }

    #[test]
    fn missing_text_fields_never_panic_and_never_match() {
        let engine = MatchingEngine::default();
        let pool = [candidate("a", None, None)];
        let query = MatchQuery {
            position: Some("developer".into()),
            company: Some("acme".into()),
        };

        assert!(engine.rank(&pool, &query).is_empty());
    }

    #[test]
    fn end_to_end_example_ranks_dual_match_first() {
        let engine = MatchingEngine::default();
        let pool = [
            candidate("1", Some("Backend Developer"), Some("Acme")),
            candidate("2", Some("Frontend Developer"), Some("Globex")),
        ];
        let query = MatchQuery {
            position: Some("developer".into()),
            company: Some("Acme".into()),
        };

        let results = engine.rank(&pool, &query);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].application.id, "1");
        assert_eq!(results[0].match_type, Some(MatchType::Both));
        assert_eq!(results[1].application.id, "2");
        assert!(results[1]
            .match_type
            .unwrap()
            .as_str()
            .starts_with("position"));
    }

    #[test]
    fn stats_pass_through_unchanged() {
        let engine = MatchingEngine::default();
        let mut seasoned = candidate("a", Some("Developer"), None);
        seasoned.application.stats = InterviewerStats {
            conducted_interviews: 42,
            average_rating: 4.6,
            total_ratings: 40,
        };

        let results = engine.rank(&[seasoned.clone()], &position_query("Developer"));
        assert_eq!(results[0].stats, seasoned.application.stats);

        let browsed = engine.rank(&[seasoned.clone()], &MatchQuery::default());
        assert_eq!(browsed[0].stats, seasoned.application.stats);
    }

    /// Scorer stub proving the matcher seam: flat score for any
    /// candidate that has the field at all.
    struct FlatMatcher(f64);

    impl FuzzyMatcher for FlatMatcher {
        fn score(&self, _: &str, _: &str, threshold: f64, _: usize) -> Option<f64> {
            (self.0 <= threshold).then_some(self.0)
        }
    }

    #[test]
    fn custom_matchers_plug_into_the_engine() {
        let engine =
            MatchingEngine::with_matcher(EngineConfig::default(), Box::new(FlatMatcher(0.2)));
        let pool = [candidate("a", Some("whatever"), None)];

        let results = engine.rank(&pool, &position_query("anything"));

        assert_eq!(results.len(), 1);
        // 0.2 through the position weight of 3.
        assert_close(results[0].score.unwrap(), 0.2 / 3.0);
    }
}
