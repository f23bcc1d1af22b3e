use super::config::ScoringConfig;
use super::domain::round_to;
use super::offsets::OffsetRisk;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Additive audit trail of the composite score. Every component carries its
/// own sign, so `total()` is a plain sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub pillar_weighted_base: f64,
    pub claim_quality_adjustment: f64,
    /// Zero or negative.
    pub offset_penalty: f64,
    pub regulatory_bonus: f64,
    /// Zero or negative.
    pub grid_penalty: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.pillar_weighted_base
            + self.claim_quality_adjustment
            + self.offset_penalty
            + self.regulatory_bonus
            + self.grid_penalty
    }
}

pub fn regulatory_bonus(alignment: &BTreeMap<String, bool>, config: &ScoringConfig) -> f64 {
    let bonus: f64 = alignment
        .iter()
        .filter(|(_, met)| **met)
        .filter_map(|(framework, _)| config.regulatory.bonuses.get(framework))
        .sum();
    bonus.min(config.regulatory.cap)
}

pub fn grid_penalty(intensity: f64, config: &ScoringConfig) -> f64 {
    let grid = &config.grid;
    if intensity > grid.high_intensity {
        grid.high_penalty
    } else if intensity > grid.elevated_intensity {
        grid.elevated_penalty
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransparencyTier {
    Transparent,
    Moderate,
    Opaque,
    Greenwashing,
}

impl TransparencyTier {
    pub fn classify(lts: f64) -> Self {
        if lts >= 80.0 {
            Self::Transparent
        } else if lts >= 60.0 {
            Self::Moderate
        } else if lts >= 40.0 {
            Self::Opaque
        } else {
            Self::Greenwashing
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Transparent => "Transparent",
            Self::Moderate => "Moderate",
            Self::Opaque => "Opaque",
            Self::Greenwashing => "Greenwashing",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Transparent => {
                "High transparency: claims are well-substantiated and disclosure is comprehensive."
            }
            Self::Moderate => {
                "Moderate transparency: some pillars are well-documented, but gaps remain."
            }
            Self::Opaque => {
                "Opaque disclosures: significant claim vagueness and lifecycle gaps detected."
            }
            Self::Greenwashing => {
                "Greenwashing detected: disclosures are primarily vague, offset-dependent, or misleading."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EsgRating {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "BBB")]
    Bbb,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "CCC")]
    Ccc,
}

impl EsgRating {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Aaa => "AAA",
            Self::Aa => "AA",
            Self::Bbb => "BBB",
            Self::Bb => "BB",
            Self::Ccc => "CCC",
        }
    }

    pub const fn interpretation(self) -> &'static str {
        match self {
            Self::Aaa => "Minimal ESG disclosure risk",
            Self::Aa => "Low-moderate ESG risk",
            Self::Bbb => "Moderate ESG risk with gaps in lifecycle reporting",
            Self::Bb => "Elevated ESG risk with significant disclosure weaknesses",
            Self::Ccc => "High ESG risk and greenwashing exposure",
        }
    }
}

/// Investor-facing index: the composite score discounted by offset risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgIndex {
    pub score: f64,
    pub rating: EsgRating,
    pub interpretation: String,
}

pub fn investor_esg_index(lts: f64, offset_risk: OffsetRisk) -> EsgIndex {
    let discount = match offset_risk {
        OffsetRisk::Low => 0.0,
        OffsetRisk::Moderate => -5.0,
        OffsetRisk::High => -15.0,
    };
    let adjusted = (lts + discount).max(0.0);

    let rating = if adjusted >= 75.0 {
        EsgRating::Aaa
    } else if adjusted >= 60.0 {
        EsgRating::Aa
    } else if adjusted >= 45.0 {
        EsgRating::Bbb
    } else if adjusted >= 30.0 {
        EsgRating::Bb
    } else {
        EsgRating::Ccc
    };

    EsgIndex {
        score: round_to(adjusted, 1),
        rating,
        interpretation: rating.interpretation().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alignment(entries: &[(&str, bool)]) -> BTreeMap<String, bool> {
        entries
            .iter()
            .map(|(name, met)| (name.to_string(), *met))
            .collect()
    }

    #[test]
    fn regulatory_bonus_counts_met_known_frameworks() {
        let config = ScoringConfig::default();
        let bonus = regulatory_bonus(
            &alignment(&[("GRI", true), ("CSRD", false), ("ISSB", true)]),
            &config,
        );
        assert_eq!(bonus, 2.0);
    }

    #[test]
    fn regulatory_bonus_is_capped() {
        let config = ScoringConfig::default();
        let bonus = regulatory_bonus(
            &alignment(&[
                ("GRI", true),
                ("CSRD", true),
                ("SEC_Climate", true),
                ("TCFD", true),
            ]),
            &config,
        );
        assert_eq!(bonus, 8.0);
    }

    #[test]
    fn grid_penalty_steps_at_thresholds() {
        let config = ScoringConfig::default();
        assert_eq!(grid_penalty(400.0, &config), 0.0);
        assert_eq!(grid_penalty(450.0, &config), -1.0);
        assert_eq!(grid_penalty(500.0, &config), -1.0);
        assert_eq!(grid_penalty(620.0, &config), -2.0);
    }

    #[test]
    fn tiers_use_inclusive_lower_bounds() {
        assert_eq!(TransparencyTier::classify(80.0), TransparencyTier::Transparent);
        assert_eq!(TransparencyTier::classify(79.9), TransparencyTier::Moderate);
        assert_eq!(TransparencyTier::classify(40.0), TransparencyTier::Opaque);
        assert_eq!(TransparencyTier::classify(-3.0), TransparencyTier::Greenwashing);
    }

    #[test]
    fn esg_index_discounts_offset_risk() {
        let index = investor_esg_index(70.0, OffsetRisk::High);
        assert_eq!(index.score, 55.0);
        assert_eq!(index.rating, EsgRating::Bbb);

        let index = investor_esg_index(10.0, OffsetRisk::High);
        assert_eq!(index.score, 0.0);
        assert_eq!(index.rating, EsgRating::Ccc);
    }

    #[test]
    fn breakdown_total_is_plain_sum() {
        let breakdown = ScoreBreakdown {
            pillar_weighted_base: 61.35,
            claim_quality_adjustment: 2.4,
            offset_penalty: -4.5,
            regulatory_bonus: 5.0,
            grid_penalty: -1.0,
        };
        assert!((breakdown.total() - 63.25).abs() < 1e-9);
    }
}
