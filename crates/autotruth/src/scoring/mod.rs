//! Transparency and greenwashing-risk scoring.
//!
//! The engine is a pure pipeline: a [`DisclosureInput`] goes through pillar
//! aggregation, the composite scorer, the risk estimator and the momentum
//! calculator, producing an immutable [`AnalysisResult`]. Comparisons rank
//! several results against the top performer. Nothing is cached between
//! calls, so one engine can be shared across threads freely.

mod claims;
mod compare;
mod composite;
mod config;
mod domain;
mod insights;
mod momentum;
mod offsets;
mod pillars;
mod risk;

pub use claims::{suggest_rewrite, ClaimRatio};
pub use compare::{ComparisonEntry, ComparisonReport, Standing};
pub use composite::{EsgIndex, EsgRating, ScoreBreakdown, TransparencyTier};
pub use config::{
    ClaimModel, ConfidenceModel, DriftModel, FieldDefaults, GridModel, OffsetModel,
    PercentileModel, RegulatoryModel, RiskModel, ScoringConfig, ScoringConfigError,
};
pub use domain::{
    Claim, ClaimType, DriftEntry, Pillar, PillarMap, PillarScores, TemporalDrift, Trend,
};
pub use insights::{RiskDriver, RiskFactor, TransparencyInsights};
pub use momentum::{score_to_percentile, signed_token, Momentum};
pub use offsets::{OffsetAnalysis, OffsetQuality, OffsetRisk};
pub use pillars::{aggregate as aggregate_pillars, compute_drift};
pub use risk::{RiskEstimate, RiskInputs};

use crate::disclosures::{CompanyRecord, DisclosureInput};
use config::finite;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Stateless engine applying one scoring configuration.
#[derive(Debug, Clone, Default)]
pub struct TransparencyEngine {
    config: ScoringConfig,
}

impl TransparencyEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn analyze(&self, input: &DisclosureInput) -> AnalysisResult {
        let config = &self.config;
        let defaults = &config.defaults;

        let pillar_scores = pillars::aggregate(&input.pillar_scores);
        let prior_year_scores = pillars::aggregate(&input.prior_year_scores);
        let temporal_drift = pillars::compute_drift(&pillar_scores, &prior_year_scores, config);

        let offset_quality = input.offset_quality.unwrap_or(defaults.offset_quality);
        let offset_dependency =
            finite(input.offset_dependency).unwrap_or(defaults.offset_dependency_pct);
        let grid_intensity =
            finite(input.grid_carbon_intensity_gco2_kwh).unwrap_or(defaults.grid_carbon_intensity);

        let claim_ratio =
            ClaimRatio::from_types(input.claims.iter().map(|claim| claim.claim_type));
        let claims = claims::fingerprint(&input.claims, offset_quality, config);
        let offset_analysis = offsets::analyze_offsets(offset_dependency, offset_quality, config);

        let breakdown = ScoreBreakdown {
            pillar_weighted_base: pillars::weighted_base(&pillar_scores, config),
            claim_quality_adjustment: claims::quality_adjustment(&claim_ratio, config),
            offset_penalty: -offset_analysis.dependency_penalty,
            regulatory_bonus: composite::regulatory_bonus(&input.regulatory_alignment, config),
            grid_penalty: composite::grid_penalty(grid_intensity, config),
        };
        let lts = breakdown.total();

        let tier = TransparencyTier::classify(lts);
        let esg_investor_index = composite::investor_esg_index(lts, offset_analysis.risk_level);
        let momentum = Momentum::from_drift(&temporal_drift);
        let confidence_band =
            momentum::confidence_band(&claims, defaults.claim_confidence, &config.confidence);
        let percentile = score_to_percentile(lts, &config.percentile);
        let risk = risk::estimate_risk(
            &RiskInputs {
                lts: Some(lts),
                offset_dependency_pct: Some(offset_dependency),
                vague_ratio: Some(claim_ratio.vague),
                supply_chain_score: Some(pillar_scores.supply_chain),
            },
            &config.risk,
        );

        let result = AnalysisResult {
            company: input.name.clone(),
            model: input.model.clone(),
            report_year: input.report_year,
            lts,
            tier,
            tier_label: tier.label().to_string(),
            tier_description: tier.description().to_string(),
            breakdown,
            pillar_scores,
            prior_year_scores,
            temporal_drift,
            claim_ratio,
            claims,
            offset_analysis,
            regulatory_alignment: input.regulatory_alignment.clone(),
            grid_carbon_intensity: grid_intensity,
            esg_investor_index,
            risk,
            momentum,
            confidence_band,
            percentile,
        };

        debug!(
            company = input.display_name(),
            lts,
            risk = result.risk.probability,
            claims = result.claims.len(),
            "computed transparency score"
        );

        result
    }

    /// Analyze every input independently, then rank them.
    pub fn compare(&self, inputs: &[DisclosureInput]) -> ComparisonReport {
        let results = inputs.iter().map(|input| self.analyze(input)).collect();
        self.rank(results)
    }

    pub fn rank(&self, results: Vec<AnalysisResult>) -> ComparisonReport {
        let report = compare::rank(results, &self.config);
        log_report(&report);
        report
    }

    /// Like [`compare`](Self::compare), but each entry keeps the registry id
    /// and logo of the record it came from.
    pub fn compare_registered(&self, records: &[CompanyRecord]) -> ComparisonReport {
        let tagged = records
            .iter()
            .map(|record| {
                let tag = compare::CompanyTag {
                    id: record.id.clone(),
                    logo: record.summary().logo,
                };
                (Some(tag), self.analyze(&record.disclosure))
            })
            .collect();
        let report = compare::rank_tagged(tagged, &self.config);
        log_report(&report);
        report
    }

    pub fn insights(&self, result: &AnalysisResult) -> TransparencyInsights {
        insights::generate_insights(result, &self.config)
    }
}

fn log_report(report: &ComparisonReport) {
    info!(
        companies = report.len(),
        leader = report
            .leader()
            .and_then(|entry| entry.result.company.as_deref())
            .unwrap_or("-"),
        "ranked comparison set"
    );
}

/// One company snapshot. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub company: Option<String>,
    pub model: Option<String>,
    pub report_year: Option<i32>,
    /// Exactly `breakdown.total()`.
    pub lts: f64,
    pub tier: TransparencyTier,
    pub tier_label: String,
    pub tier_description: String,
    pub breakdown: ScoreBreakdown,
    pub pillar_scores: PillarScores,
    pub prior_year_scores: PillarScores,
    pub temporal_drift: TemporalDrift,
    pub claim_ratio: ClaimRatio,
    pub claims: Vec<Claim>,
    pub offset_analysis: OffsetAnalysis,
    pub regulatory_alignment: BTreeMap<String, bool>,
    pub grid_carbon_intensity: f64,
    pub esg_investor_index: EsgIndex,
    pub risk: RiskEstimate,
    pub momentum: Momentum,
    pub confidence_band: f64,
    pub percentile: u8,
}

impl AnalysisResult {
    pub fn risk_inputs(&self) -> RiskInputs {
        RiskInputs {
            lts: Some(self.lts),
            offset_dependency_pct: Some(self.offset_analysis.offset_dependency_pct),
            vague_ratio: Some(self.claim_ratio.vague),
            supply_chain_score: Some(self.pillar_scores.supply_chain),
        }
    }

    pub fn risk_estimate(&self, config: &ScoringConfig) -> RiskEstimate {
        risk::estimate_risk(&self.risk_inputs(), &config.risk)
    }

    /// Lower and upper edge of the confidence interval around `lts`.
    pub fn score_interval(&self) -> (f64, f64) {
        (self.lts - self.confidence_band, self.lts + self.confidence_band)
    }
}

/// Convenience wrapper over [`RiskInputs`] for callers without a result.
pub fn estimate_risk(inputs: &RiskInputs, config: &ScoringConfig) -> RiskEstimate {
    risk::estimate_risk(inputs, &config.risk)
}

/// Half-width of the composite score's confidence interval for `claims`.
pub fn confidence_band(claims: &[Claim], config: &ScoringConfig) -> f64 {
    momentum::confidence_band(claims, config.defaults.claim_confidence, &config.confidence)
}
