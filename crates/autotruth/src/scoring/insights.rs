use super::config::ScoringConfig;
use super::domain::Pillar;
use super::AnalysisResult;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    LowTransparency,
    OffsetReliance,
    VagueClaims,
    WeakSupplyChain,
}

impl RiskFactor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LowTransparency => "Low transparency score",
            Self::OffsetReliance => "Offset reliance",
            Self::VagueClaims => "Vague claims",
            Self::WeakSupplyChain => "Weak supply-chain disclosure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskDriver {
    pub factor: RiskFactor,
    pub label: &'static str,
    /// Points this factor adds to the raw risk score.
    pub contribution: f64,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransparencyInsights {
    pub risk_probability: f64,
    pub momentum: String,
    pub strongest_pillar: &'static str,
    pub weakest_pillar: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub risk_drivers: Vec<RiskDriver>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommended_actions: Vec<String>,
}

pub(crate) fn generate_insights(
    result: &AnalysisResult,
    config: &ScoringConfig,
) -> TransparencyInsights {
    let risk = result.risk_estimate(config);
    let weighted_lts_penalty = risk.lts_penalty * config.risk.lts_weight;

    let mut risk_drivers: Vec<RiskDriver> = [
        (
            RiskFactor::LowTransparency,
            weighted_lts_penalty,
            format!("composite score {:.1} of 100", result.lts),
        ),
        (
            RiskFactor::OffsetReliance,
            risk.offset_penalty,
            format!(
                "{:.0}% of claimed reductions come from offsets",
                result.offset_analysis.offset_dependency_pct
            ),
        ),
        (
            RiskFactor::VagueClaims,
            risk.vague_penalty,
            format!(
                "{} of {} claims are vague",
                result.claim_ratio.vague_count, result.claim_ratio.total
            ),
        ),
        (
            RiskFactor::WeakSupplyChain,
            risk.supply_penalty,
            format!(
                "supply-chain pillar at {:.0}, below {:.0}",
                result.pillar_scores.supply_chain, config.risk.supply_chain_floor
            ),
        ),
    ]
    .into_iter()
    .filter(|(_, contribution, _)| *contribution > 0.0)
    .map(|(factor, contribution, detail)| RiskDriver {
        factor,
        label: factor.label(),
        contribution,
        detail,
    })
    .collect();
    risk_drivers.sort_by(|left, right| right.contribution.total_cmp(&left.contribution));

    let (strongest, weakest) = extreme_pillars(result);

    let mut observations = Vec::new();
    if result.claim_ratio.total > 0 && result.claim_ratio.vague >= 0.5 {
        observations.push(format!(
            "{:.0}% of disclosed claims are vague and unquantified",
            result.claim_ratio.vague * 100.0
        ));
    }

    if result.offset_analysis.exceeds_threshold {
        observations.push(format!(
            "Offset dependency {:.0}% exceeds the {:.0}% threshold ({})",
            result.offset_analysis.offset_dependency_pct,
            result.offset_analysis.threshold,
            result.offset_analysis.offset_quality.label()
        ));
    }

    let missing_frameworks: Vec<&str> = config
        .regulatory
        .bonuses
        .keys()
        .filter(|framework| result.regulatory_alignment.get(*framework) != Some(&true))
        .map(String::as_str)
        .collect();
    if !missing_frameworks.is_empty() {
        observations.push(format!(
            "Not aligned with {}",
            missing_frameworks.join(", ")
        ));
    }

    if result.momentum.avg_delta > config.drift.trend_threshold {
        observations.push(format!(
            "Disclosure quality improving year over year ({} avg per pillar)",
            result.momentum.sign
        ));
    } else if result.momentum.avg_delta < -config.drift.trend_threshold {
        observations.push(format!(
            "Disclosure quality declining year over year ({} avg per pillar)",
            result.momentum.sign
        ));
    }

    let mut recommended_actions = Vec::new();
    if result.claim_ratio.vague_count > 0 {
        recommended_actions.push(format!(
            "Rewrite {} vague claim{} with measurable targets and baselines",
            result.claim_ratio.vague_count,
            if result.claim_ratio.vague_count == 1 { "" } else { "s" }
        ));
    }

    if result.offset_analysis.dependency_penalty > 0.0 {
        recommended_actions.push(
            "Shift reductions from purchased offsets to operational abatement".to_string(),
        );
    }

    if result.pillar_scores.display_value(weakest) < 50.0 {
        recommended_actions.push(format!(
            "Expand disclosure for {} (currently {:.0})",
            weakest.label(),
            result.pillar_scores.display_value(weakest)
        ));
    }

    if !missing_frameworks.is_empty() {
        recommended_actions.push(format!(
            "Map reporting to {} to earn regulatory alignment credit",
            missing_frameworks.join(", ")
        ));
    }

    if observations.is_empty() {
        observations.push("No material disclosure gaps detected".to_string());
    }

    TransparencyInsights {
        risk_probability: risk.probability,
        momentum: result.momentum.sign.clone(),
        strongest_pillar: strongest.label(),
        weakest_pillar: weakest.label(),
        risk_drivers,
        observations,
        recommended_actions,
    }
}

/// First pillar in canonical order wins ties.
fn extreme_pillars(result: &AnalysisResult) -> (Pillar, Pillar) {
    let scores = &result.pillar_scores;
    let mut strongest = Pillar::RawMaterials;
    let mut weakest = Pillar::RawMaterials;

    for pillar in Pillar::ordered() {
        if scores.display_value(pillar) > scores.display_value(strongest) {
            strongest = pillar;
        }
        if scores.display_value(pillar) < scores.display_value(weakest) {
            weakest = pillar;
        }
    }

    (strongest, weakest)
}
