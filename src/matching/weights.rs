//! Pass configurations and score adjustments.
//!
//! Scores are priority keys: lower ranks first. The adjustment constants
//! are product values, not normalized quantities; together they encode
//! "role relevance outranks employer relevance".

/// Matchable candidate fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Position,
    Qualification,
    Company,
    College,
}

/// One field with its weight. The raw distance is divided by the weight,
/// so heavier fields dominate when they qualify.
#[derive(Debug, Clone, Copy)]
pub struct WeightedField {
    pub field: MatchField,
    pub weight: f64,
}

/// Field set, distance window and qualifying threshold for one fuzzy pass.
#[derive(Debug, Clone, Copy)]
pub struct PassConfig {
    /// Per-field maximum distance ratio; fields above it do not match.
    pub threshold: f64,
    /// Characters a match may sit from the field start before the
    /// positional penalty pushes it past the threshold.
    pub distance: usize,
    pub fields: &'static [WeightedField],
}

/// Strict pass over role text: only close matches count.
pub const POSITION_PASS_THRESHOLD: f64 = 0.3;

/// Lenient pass over employer text.
pub const COMPANY_PASS_THRESHOLD: f64 = 0.4;

/// Shared positional window for both passes.
pub const MATCH_DISTANCE: usize = 100;

pub const POSITION_FIELDS: [WeightedField; 2] = [
    WeightedField {
        field: MatchField::Position,
        weight: 3.0,
    },
    WeightedField {
        field: MatchField::Qualification,
        weight: 1.0,
    },
];

pub const COMPANY_FIELDS: [WeightedField; 2] = [
    WeightedField {
        field: MatchField::Company,
        weight: 2.0,
    },
    WeightedField {
        field: MatchField::College,
        weight: 1.0,
    },
];

/// Fixed score for a stemmed-term overlap ("word") match. A coarse recall
/// booster: above any strong fuzzy hit, below the position threshold, and
/// never allowed to weaken a better pre-existing score.
pub const WORD_MATCH_SCORE: f64 = 0.15;

/// Added to company-only scores so employer-only matches rank behind
/// every position-qualified match.
pub const COMPANY_ONLY_PENALTY: f64 = 0.3;

/// Multiplier for candidates matching both criteria; a dual match ranks
/// strictly better than either criterion alone.
pub const DUAL_MATCH_FACTOR: f64 = 0.5;

pub fn position_pass(threshold: f64) -> PassConfig {
    PassConfig {
        threshold,
        distance: MATCH_DISTANCE,
        fields: &POSITION_FIELDS,
    }
}

pub fn company_pass(threshold: f64) -> PassConfig {
    PassConfig {
        threshold,
        distance: MATCH_DISTANCE,
        fields: &COMPANY_FIELDS,
    }
}
