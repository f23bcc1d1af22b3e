use super::config::{finite, ConfidenceModel, PercentileModel};
use super::domain::{Claim, DriftEntry, PillarMap};
use serde::{Deserialize, Serialize};

/// Average pillar drift and its display token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Momentum {
    pub avg_delta: f64,
    pub sign: String,
}

impl Momentum {
    pub fn from_deltas(deltas: impl IntoIterator<Item = f64>) -> Self {
        // running mean; a plain sum overflows for scores near f64::MAX
        let (avg_delta, _) = deltas
            .into_iter()
            .filter(|delta| delta.is_finite())
            .fold((0.0, 0usize), |(mean, count), delta| {
                let count = count + 1;
                (mean + (delta - mean) / count as f64, count)
            });

        Self {
            avg_delta,
            sign: signed_token(avg_delta),
        }
    }

    pub fn from_drift(drift: &PillarMap<DriftEntry>) -> Self {
        Self::from_deltas(drift.iter().map(|(_, entry)| entry.delta))
    }

    pub fn is_improving(&self) -> bool {
        self.avg_delta > 0.0
    }
}

/// One decimal place with an explicit `+` for non-negative values.
pub fn signed_token(value: f64) -> String {
    if value.is_nan() {
        return "+0.0".to_string();
    }
    let formatted = format!("{:.1}", value.abs());
    if value < 0.0 && formatted != "0.0" {
        format!("-{formatted}")
    } else {
        format!("+{formatted}")
    }
}

/// Half-width of the confidence interval drawn around the composite score.
pub fn confidence_band(claims: &[Claim], default_confidence: f64, model: &ConfidenceModel) -> f64 {
    if claims.is_empty() {
        return model.empty_band;
    }

    let total: f64 = claims
        .iter()
        .map(|claim| finite(claim.confidence).unwrap_or(default_confidence))
        .sum();
    let mean = total / claims.len() as f64;

    ((1.0 - mean) * model.band_scale).max(model.min_band)
}

/// Display percentile: the score itself, rounded and clamped. This is not a
/// population statistic.
pub fn score_to_percentile(score: f64, model: &PercentileModel) -> u8 {
    let value = if score.is_finite() { score.round() } else { 0.0 };
    value.max(f64::from(model.min)).min(f64::from(model.max)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::{ClaimType, Pillar};

    fn claim(confidence: Option<f64>) -> Claim {
        Claim {
            text: "Pack recycling rate reached 92%.".to_string(),
            claim_type: ClaimType::Numeric,
            pillar: Pillar::EndOfLife,
            verified: true,
            confidence,
            impact_score: 5.0,
            rewrite_suggestion: None,
        }
    }

    #[test]
    fn empty_drift_yields_zero_with_plus_sign() {
        let momentum = Momentum::from_deltas(Vec::new());
        assert_eq!(momentum.avg_delta, 0.0);
        assert_eq!(momentum.sign, "+0.0");
    }

    #[test]
    fn momentum_averages_deltas() {
        let momentum = Momentum::from_deltas([4.0, -1.0, 0.0]);
        assert!((momentum.avg_delta - 1.0).abs() < 1e-9);
        assert_eq!(momentum.sign, "+1.0");

        let momentum = Momentum::from_deltas([-2.5, -0.5]);
        assert_eq!(momentum.sign, "-1.5");
        assert!(!momentum.is_improving());
    }

    #[test]
    fn sign_token_never_shows_negative_zero() {
        assert_eq!(signed_token(-0.0), "+0.0");
        assert_eq!(signed_token(-0.04), "+0.0");
        assert_eq!(signed_token(-0.05001), "-0.1");
        assert_eq!(signed_token(12.345), "+12.3");
    }

    #[test]
    fn confidence_band_defaults_for_empty_claims() {
        let band = confidence_band(&[], 0.6, &ConfidenceModel::default());
        assert_eq!(band, 6.0);
    }

    #[test]
    fn confidence_band_uses_default_for_missing_confidence() {
        let model = ConfidenceModel::default();
        let band = confidence_band(&[claim(None), claim(None)], 0.6, &model);
        assert!((band - 8.0).abs() < 1e-9);

        let band = confidence_band(&[claim(Some(0.95)), claim(Some(0.99))], 0.6, &model);
        assert_eq!(band, 2.5);
    }

    #[test]
    fn huge_deltas_average_without_overflow() {
        let momentum = Momentum::from_deltas([1.5e308, 1.5e308]);
        assert!(momentum.avg_delta.is_finite());
        assert!(momentum.is_improving());
    }

    #[test]
    fn inverted_percentile_bounds_do_not_panic() {
        let model = PercentileModel { min: 80, max: 20 };
        assert_eq!(score_to_percentile(50.0, &model), 20);
    }

    #[test]
    fn percentile_is_clamped_and_monotonic() {
        let model = PercentileModel::default();
        assert_eq!(score_to_percentile(-20.0, &model), 1);
        assert_eq!(score_to_percentile(0.4, &model), 1);
        assert_eq!(score_to_percentile(63.5, &model), 64);
        assert_eq!(score_to_percentile(150.0, &model), 99);
        assert_eq!(score_to_percentile(f64::NAN, &model), 1);

        assert_eq!(score_to_percentile(1e307, &model), 99);

        let mut previous = 0;
        for step in -50..=1500 {
            let percentile = score_to_percentile(step as f64 / 10.0, &model);
            assert!(percentile >= previous);
            assert!((1..=99).contains(&percentile));
            previous = percentile;
        }
    }
}
