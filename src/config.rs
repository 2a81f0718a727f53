use std::str::FromStr;

use tracing::warn;

use crate::matching::weights::{COMPANY_PASS_THRESHOLD, POSITION_PASS_THRESHOLD};
use crate::stem::StemmerKind;

/// Engine tuning, sourced from environment variables with the product
/// defaults as fallback. Invalid values warn and fall back; engine
/// construction never fails on configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Qualifying threshold for the strict position pass.
    pub position_threshold: f64,
    /// Qualifying threshold for the lenient company pass.
    pub company_threshold: f64,
    /// Stemming strategy for the term-overlap booster.
    pub stemmer: StemmerKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            position_threshold: POSITION_PASS_THRESHOLD,
            company_threshold: COMPANY_PASS_THRESHOLD,
            stemmer: StemmerKind::default(),
        }
    }
}

impl EngineConfig {
    /// Reads `SB_POSITION_MATCH_THRESHOLD`, `SB_COMPANY_MATCH_THRESHOLD`
    /// and `SB_STEMMER`.
    pub fn from_env() -> Self {
        Self {
            position_threshold: env_threshold(
                "SB_POSITION_MATCH_THRESHOLD",
                POSITION_PASS_THRESHOLD,
            ),
            company_threshold: env_threshold("SB_COMPANY_MATCH_THRESHOLD", COMPANY_PASS_THRESHOLD),
            stemmer: env_stemmer(),
        }
    }
}

fn env_threshold(var: &str, default: f64) -> f64 {
    let Ok(raw) = std::env::var(var) else {
        return default;
    };
    match raw.parse::<f64>() {
        Ok(value) if (0.0..=1.0).contains(&value) => value,
        _ => {
            warn!(var, raw = %raw, "ignoring invalid threshold override");
            default
        }
    }
}

fn env_stemmer() -> StemmerKind {
    let Ok(raw) = std::env::var("SB_STEMMER") else {
        return StemmerKind::default();
    };
    match StemmerKind::from_str(&raw) {
        Ok(kind) => kind,
        Err(err) => {
            warn!(%err, "ignoring invalid SB_STEMMER");
            StemmerKind::default()
        }
    }
}
