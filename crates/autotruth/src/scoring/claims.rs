use super::config::{finite, ScoringConfig};
use super::domain::{round_to, Claim, ClaimType};
use super::offsets::OffsetQuality;
use crate::disclosures::ClaimInput;
use serde::{Deserialize, Serialize};

/// Share of claims per evidence class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimRatio {
    pub numeric: f64,
    pub vague: f64,
    pub offset: f64,
    pub numeric_count: usize,
    pub vague_count: usize,
    pub offset_count: usize,
    pub total: usize,
}

impl ClaimRatio {
    pub fn from_types(types: impl IntoIterator<Item = ClaimType>) -> Self {
        let mut ratio = Self::default();
        for claim_type in types {
            ratio.total += 1;
            match claim_type {
                ClaimType::Numeric => ratio.numeric_count += 1,
                ClaimType::Vague => ratio.vague_count += 1,
                ClaimType::OffsetBacked => ratio.offset_count += 1,
                ClaimType::Other => {}
            }
        }

        if ratio.total > 0 {
            let total = ratio.total as f64;
            ratio.numeric = round_to(ratio.numeric_count as f64 / total, 3);
            ratio.vague = round_to(ratio.vague_count as f64 / total, 3);
            ratio.offset = round_to(ratio.offset_count as f64 / total, 3);
        }

        ratio
    }
}

const REWRITE_SUGGESTIONS: [(&str, &str); 9] = [
    (
        "committed to",
        "State the specific target (e.g., 'committed to reducing Scope 1 emissions by 45% by 2030 vs. 2019 baseline')",
    ),
    (
        "strives to",
        "Replace with a measurable commitment and timeline.",
    ),
    (
        "eco-friendly",
        "Quantify the impact (e.g., 'reduces lifecycle CO2 by X% vs. equivalent ICE vehicle').",
    ),
    (
        "sustainable future",
        "Disclose specific emission reduction targets with base year and verification methodology.",
    ),
    (
        "responsible sourcing",
        "Reference a third-party audit or certification (e.g., IRMA, RMI Responsible Minerals).",
    ),
    (
        "under assessment",
        "Provide current scope and expected reporting timeline.",
    ),
    (
        "being established",
        "Disclose the partner, target recovery rate, and projected timeline.",
    ),
    (
        "plans to",
        "Commit to a specific, time-bound, measurable target.",
    ),
    (
        "dedicated to",
        "Replace with a quantified target and accountability mechanism.",
    ),
];

const GENERIC_REWRITE: &str =
    "Replace vague language with specific metrics, timelines, and verified data sources.";

pub fn suggest_rewrite(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    REWRITE_SUGGESTIONS
        .iter()
        .find(|(trigger, _)| lowered.contains(trigger))
        .map(|(_, suggestion)| *suggestion)
        .unwrap_or(GENERIC_REWRITE)
}

/// Signed contribution of a single claim to the greenwash fingerprint.
pub fn impact_score(
    claim_type: ClaimType,
    verified: bool,
    offset_quality: OffsetQuality,
    config: &ScoringConfig,
) -> f64 {
    match claim_type {
        ClaimType::Vague => config.claims.vague_impact,
        ClaimType::OffsetBacked if offset_quality == OffsetQuality::Unverified => {
            config.claims.unverified_offset_impact
        }
        ClaimType::Numeric if verified => config.claims.verified_numeric_impact,
        _ => 0.0,
    }
}

/// Attach impact scores and rewrite suggestions, preserving extraction order.
pub fn fingerprint(
    claims: &[ClaimInput],
    offset_quality: OffsetQuality,
    config: &ScoringConfig,
) -> Vec<Claim> {
    claims
        .iter()
        .map(|input| {
            let verified = input.verified.unwrap_or(false);
            let rewrite_suggestion = match input.claim_type {
                ClaimType::Vague => Some(
                    input
                        .rewrite_suggestion
                        .clone()
                        .unwrap_or_else(|| suggest_rewrite(&input.text).to_string()),
                ),
                _ => input.rewrite_suggestion.clone(),
            };

            Claim {
                text: input.text.clone(),
                claim_type: input.claim_type,
                pillar: input.pillar,
                verified,
                confidence: finite(input.confidence),
                impact_score: impact_score(input.claim_type, verified, offset_quality, config),
                rewrite_suggestion,
            }
        })
        .collect()
}

pub fn quality_adjustment(ratio: &ClaimRatio, config: &ScoringConfig) -> f64 {
    round_to(
        ratio.numeric * config.claims.numeric_weight - ratio.vague * config.claims.vague_weight,
        2,
    )
}
