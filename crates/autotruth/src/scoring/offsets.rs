use super::config::ScoringConfig;
use super::domain::round_to;
use serde::{Deserialize, Serialize};

/// Verification tier of the offsets a disclosure relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffsetQuality {
    #[serde(rename = "Gold Standard")]
    GoldStandard,
    #[serde(rename = "VCS")]
    Vcs,
    #[serde(rename = "None")]
    None,
    #[serde(rename = "Unverified")]
    #[serde(other)]
    Unverified,
}

impl OffsetQuality {
    pub const fn label(self) -> &'static str {
        match self {
            Self::GoldStandard => "Gold Standard",
            Self::Vcs => "VCS",
            Self::None => "None",
            Self::Unverified => "Unverified",
        }
    }

    pub const fn quality_score(self) -> f64 {
        match self {
            Self::GoldStandard => 90.0,
            Self::Vcs => 65.0,
            Self::Unverified => 25.0,
            Self::None => 100.0,
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::GoldStandard => {
                "High-integrity offset, verified by the Gold Standard foundation with co-benefits."
            }
            Self::Vcs => {
                "Moderate-integrity offset, Verified Carbon Standard: widely recognized but variable quality."
            }
            Self::Unverified => {
                "Low-integrity offset with no recognized third-party verification. High greenwash risk."
            }
            Self::None => {
                "No carbon offsets used. Emission reductions are operational and technology-driven."
            }
        }
    }

    /// Amplifies the dependency penalty for weaker tiers.
    fn penalty_multiplier(self) -> f64 {
        let score = self.quality_score();
        if score >= 80.0 {
            1.0
        } else if score >= 60.0 {
            1.5
        } else {
            2.5
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OffsetRisk {
    Low,
    Moderate,
    High,
}

impl OffsetRisk {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Offset Risk",
            Self::Moderate => "Moderate Offset Risk",
            Self::High => "High Greenwash Risk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetAnalysis {
    pub offset_dependency_pct: f64,
    pub offset_quality: OffsetQuality,
    pub quality_score: f64,
    pub quality_description: String,
    /// Positive magnitude; the breakdown stores it negated.
    pub dependency_penalty: f64,
    pub risk_level: OffsetRisk,
    pub risk_label: String,
    pub threshold: f64,
    pub exceeds_threshold: bool,
}

pub fn analyze_offsets(
    dependency_pct: f64,
    quality: OffsetQuality,
    config: &ScoringConfig,
) -> OffsetAnalysis {
    let model = &config.offsets;
    let quality_score = quality.quality_score();
    let verified = quality_score >= 65.0;

    let dependency_penalty = if quality != OffsetQuality::None && dependency_pct > model.threshold_pct
    {
        let excess = dependency_pct - model.threshold_pct;
        round_to((excess / 10.0) * quality.penalty_multiplier() * 3.0, 1).min(model.penalty_cap)
    } else {
        0.0
    };

    let risk_level = if quality == OffsetQuality::None
        || (dependency_pct < model.low_risk_pct && verified)
    {
        OffsetRisk::Low
    } else if dependency_pct < model.threshold_pct && verified {
        OffsetRisk::Moderate
    } else if quality == OffsetQuality::Unverified || dependency_pct > model.high_risk_pct {
        OffsetRisk::High
    } else {
        OffsetRisk::Moderate
    };

    OffsetAnalysis {
        offset_dependency_pct: dependency_pct,
        offset_quality: quality,
        quality_score,
        quality_description: quality.description().to_string(),
        dependency_penalty,
        risk_level,
        risk_label: risk_level.label().to_string(),
        threshold: model.threshold_pct,
        exceeds_threshold: dependency_pct > model.threshold_pct && quality != OffsetQuality::None,
    }
}
