use super::config::ScoringConfig;
use super::domain::{round_to, DriftEntry, Pillar, PillarScores, TemporalDrift, Trend};
use std::collections::BTreeMap;
use tracing::warn;

/// Map raw collaborator metrics onto the six pillars. Missing or non-finite
/// values become 0 and unrecognized keys are dropped. No clamping happens
/// here.
pub fn aggregate(raw: &BTreeMap<String, f64>) -> PillarScores {
    let mut scores = PillarScores::default();

    for (key, value) in raw {
        let Some(pillar) = Pillar::from_key(key) else {
            warn!(key = %key, "ignoring metric for unknown pillar");
            continue;
        };

        if value.is_finite() {
            *scores.get_mut(pillar) = *value;
        } else {
            warn!(pillar = pillar.key(), "non-finite pillar metric treated as 0");
        }
    }

    scores
}

pub fn weighted_base(scores: &PillarScores, config: &ScoringConfig) -> f64 {
    let total: f64 = scores
        .iter()
        .map(|(pillar, score)| score * config.weight(pillar))
        .sum();
    round_to(total, 2)
}

pub fn compute_drift(
    current: &PillarScores,
    previous: &PillarScores,
    config: &ScoringConfig,
) -> TemporalDrift {
    let threshold = config.drift.trend_threshold;
    current.map(|pillar, current| {
        let previous = *previous.get(pillar);
        let delta = round_to(current - previous, 1);
        let trend = if delta > threshold {
            Trend::Improved
        } else if delta < -threshold {
            Trend::Declined
        } else {
            Trend::Stable
        };

        DriftEntry {
            current: *current,
            previous,
            delta,
            trend,
        }
    })
}
