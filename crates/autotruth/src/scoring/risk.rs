use super::config::{finite, RiskModel};
use serde::{Deserialize, Serialize};

/// Inputs to the greenwashing-risk model. Every field is optional; a missing
/// or non-finite value contributes the documented default (0), which for
/// `lts` means the maximal score penalty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskInputs {
    pub lts: Option<f64>,
    pub offset_dependency_pct: Option<f64>,
    pub vague_ratio: Option<f64>,
    pub supply_chain_score: Option<f64>,
}

/// Modeled greenwashing probability with the terms that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskEstimate {
    /// Percentage in `[min_probability, max_probability]`.
    pub probability: f64,
    pub raw: f64,
    pub lts_penalty: f64,
    pub offset_penalty: f64,
    pub vague_penalty: f64,
    pub supply_penalty: f64,
}

pub fn estimate_risk(inputs: &RiskInputs, model: &RiskModel) -> RiskEstimate {
    let lts = finite(inputs.lts).unwrap_or(0.0);
    let offset_dependency = finite(inputs.offset_dependency_pct).unwrap_or(0.0);
    let vague_ratio = finite(inputs.vague_ratio).unwrap_or(0.0);
    let supply_chain = finite(inputs.supply_chain_score).unwrap_or(0.0);

    let lts_penalty = 100.0 - lts;
    let offset_penalty = offset_dependency * model.offset_weight;
    let vague_penalty = vague_ratio * model.vague_weight;
    let supply_penalty = (model.supply_chain_floor - supply_chain).max(0.0) * model.supply_chain_weight;

    let raw = lts_penalty * model.lts_weight + offset_penalty + vague_penalty + supply_penalty;
    // f64::clamp panics on inverted bounds from an unvalidated table
    let probability = raw.max(model.min_probability).min(model.max_probability);

    RiskEstimate {
        probability,
        raw,
        lts_penalty,
        offset_penalty,
        vague_penalty,
        supply_penalty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(lts: f64, offset: f64, vague: f64, supply: f64) -> RiskInputs {
        RiskInputs {
            lts: Some(lts),
            offset_dependency_pct: Some(offset),
            vague_ratio: Some(vague),
            supply_chain_score: Some(supply),
        }
    }

    #[test]
    fn reference_case_is_not_clamped() {
        let estimate = estimate_risk(&inputs(40.0, 50.0, 0.5, 30.0), &RiskModel::default());

        assert!((estimate.lts_penalty - 60.0).abs() < 1e-9);
        assert!((estimate.offset_penalty - 17.5).abs() < 1e-9);
        assert!((estimate.vague_penalty - 14.0).abs() < 1e-9);
        assert!((estimate.supply_penalty - 6.0).abs() < 1e-9);
        assert!((estimate.probability - 74.7).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_score_clamps_to_floor() {
        let estimate = estimate_risk(&inputs(150.0, 0.0, 0.0, 80.0), &RiskModel::default());
        assert!((estimate.lts_penalty + 50.0).abs() < 1e-9);
        assert!(estimate.raw < 0.0);
        assert_eq!(estimate.probability, 5.0);
    }

    #[test]
    fn extreme_inputs_stay_bounded() {
        let model = RiskModel::default();
        let cases = [
            inputs(0.0, 1000.0, 1.0, 0.0),
            inputs(100.0, 0.0, 0.0, 100.0),
            inputs(0.0, 0.0, 0.0, 0.0),
            inputs(-500.0, -500.0, -3.0, 900.0),
            inputs(1e12, 1e12, 1e12, -1e12),
        ];

        for case in cases {
            let estimate = estimate_risk(&case, &model);
            assert!(
                (5.0..=95.0).contains(&estimate.probability),
                "{case:?} -> {}",
                estimate.probability
            );
        }
    }

    #[test]
    fn missing_score_defaults_to_maximal_penalty() {
        let estimate = estimate_risk(&RiskInputs::default(), &RiskModel::default());

        assert_eq!(estimate.lts_penalty, 100.0);
        assert_eq!(estimate.offset_penalty, 0.0);
        assert_eq!(estimate.vague_penalty, 0.0);
        assert!((estimate.supply_penalty - 15.0).abs() < 1e-9);
        assert!((estimate.raw - 77.0).abs() < 1e-9);
        assert!((estimate.probability - 77.0).abs() < 1e-9);
    }

    #[test]
    fn inverted_bounds_do_not_panic() {
        let model = RiskModel {
            min_probability: 96.0,
            ..RiskModel::default()
        };
        let estimate = estimate_risk(&inputs(40.0, 50.0, 0.5, 30.0), &model);
        assert_eq!(estimate.probability, 95.0);
    }

    #[test]
    fn non_finite_inputs_are_treated_as_missing() {
        let model = RiskModel::default();
        let estimate = estimate_risk(
            &RiskInputs {
                lts: Some(f64::NAN),
                offset_dependency_pct: Some(f64::INFINITY),
                vague_ratio: None,
                supply_chain_score: Some(f64::NEG_INFINITY),
            },
            &model,
        );
        assert_eq!(estimate, estimate_risk(&RiskInputs::default(), &model));
    }
}
