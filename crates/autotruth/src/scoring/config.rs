use super::domain::{Pillar, PillarMap};
use super::offsets::OffsetQuality;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Every constant the engine uses, in one table. Partial JSON overrides are
/// accepted; anything omitted keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    #[serde(deserialize_with = "overlay_default_weights")]
    pub pillar_weights: PillarMap<f64>,
    pub claims: ClaimModel,
    pub offsets: OffsetModel,
    pub regulatory: RegulatoryModel,
    pub grid: GridModel,
    pub drift: DriftModel,
    pub risk: RiskModel,
    pub confidence: ConfidenceModel,
    pub percentile: PercentileModel,
    pub defaults: FieldDefaults,
}

fn default_weights() -> PillarMap<f64> {
    PillarMap::from_fn(|pillar| match pillar {
        Pillar::RawMaterials => 0.20,
        Pillar::Manufacturing => 0.20,
        Pillar::SupplyChain => 0.15,
        Pillar::UsePhase => 0.20,
        Pillar::EndOfLife => 0.15,
        Pillar::Offsets => 0.10,
    })
}

/// Weights named in the override replace the defaults; the rest are kept.
fn overlay_default_weights<'de, D>(deserializer: D) -> Result<PillarMap<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let overrides = BTreeMap::<Pillar, f64>::deserialize(deserializer)?;
    let mut weights = default_weights();
    for (pillar, weight) in overrides {
        *weights.get_mut(pillar) = weight;
    }
    Ok(weights)
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            pillar_weights: default_weights(),
            claims: ClaimModel::default(),
            offsets: OffsetModel::default(),
            regulatory: RegulatoryModel::default(),
            grid: GridModel::default(),
            drift: DriftModel::default(),
            risk: RiskModel::default(),
            confidence: ConfidenceModel::default(),
            percentile: PercentileModel::default(),
            defaults: FieldDefaults::default(),
        }
    }
}

impl ScoringConfig {
    /// Load an override file. Missing sections fall back to defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScoringConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ScoringConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|source| ScoringConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        config.check_weights();
        Ok(config)
    }

    /// Reject tables the engine cannot apply: inverted clamp bounds or
    /// non-finite limits.
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let risk = &self.risk;
        if !risk.min_probability.is_finite() || !risk.max_probability.is_finite() {
            return Err(ScoringConfigError::Invalid(
                "risk probability bounds must be finite".to_string(),
            ));
        }
        if risk.min_probability > risk.max_probability {
            return Err(ScoringConfigError::Invalid(format!(
                "risk.min_probability {} exceeds risk.max_probability {}",
                risk.min_probability, risk.max_probability
            )));
        }
        if self.percentile.min > self.percentile.max {
            return Err(ScoringConfigError::Invalid(format!(
                "percentile.min {} exceeds percentile.max {}",
                self.percentile.min, self.percentile.max
            )));
        }
        if let Some((pillar, _)) = self
            .pillar_weights
            .iter()
            .find(|(_, weight)| !weight.is_finite())
        {
            return Err(ScoringConfigError::Invalid(format!(
                "weight for {} must be finite",
                pillar.key()
            )));
        }
        Ok(())
    }

    pub fn weight(&self, pillar: Pillar) -> f64 {
        *self.pillar_weights.get(pillar)
    }

    fn check_weights(&self) {
        let total: f64 = self.pillar_weights.iter().map(|(_, weight)| *weight).sum();
        if (total - 1.0).abs() > 1e-6 {
            warn!(total, "pillar weights do not sum to 1.0; base score leaves nominal range");
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("failed to read scoring config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid scoring config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unusable scoring config: {0}")]
    Invalid(String),
}

/// Claim-quality weights and per-claim fingerprint scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimModel {
    pub numeric_weight: f64,
    pub vague_weight: f64,
    pub vague_impact: f64,
    pub unverified_offset_impact: f64,
    pub verified_numeric_impact: f64,
}

impl Default for ClaimModel {
    fn default() -> Self {
        Self {
            numeric_weight: 8.0,
            vague_weight: 6.0,
            vague_impact: -8.0,
            unverified_offset_impact: -12.0,
            verified_numeric_impact: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetModel {
    /// Dependency percentage above which offsets are penalized.
    pub threshold_pct: f64,
    pub penalty_cap: f64,
    /// Below this dependency a verified tier counts as low risk.
    pub low_risk_pct: f64,
    /// Above this dependency any tier counts as high risk.
    pub high_risk_pct: f64,
}

impl Default for OffsetModel {
    fn default() -> Self {
        Self {
            threshold_pct: 30.0,
            penalty_cap: 20.0,
            low_risk_pct: 15.0,
            high_risk_pct: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegulatoryModel {
    pub bonuses: BTreeMap<String, f64>,
    pub cap: f64,
}

impl Default for RegulatoryModel {
    fn default() -> Self {
        let bonuses = [
            ("GRI", 2.0),
            ("CSRD", 3.0),
            ("SEC_Climate", 2.5),
            ("TCFD", 1.5),
        ]
        .into_iter()
        .map(|(framework, bonus)| (framework.to_string(), bonus))
        .collect();

        Self { bonuses, cap: 8.0 }
    }
}

/// Grid carbon intensity (gCO2/kWh) thresholds applied to the use phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridModel {
    pub high_intensity: f64,
    pub high_penalty: f64,
    pub elevated_intensity: f64,
    pub elevated_penalty: f64,
}

impl Default for GridModel {
    fn default() -> Self {
        Self {
            high_intensity: 500.0,
            high_penalty: -2.0,
            elevated_intensity: 400.0,
            elevated_penalty: -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftModel {
    pub trend_threshold: f64,
}

impl Default for DriftModel {
    fn default() -> Self {
        Self {
            trend_threshold: 2.0,
        }
    }
}

/// Fixed empirical coefficients of the greenwashing-risk model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskModel {
    pub lts_weight: f64,
    pub offset_weight: f64,
    pub vague_weight: f64,
    pub supply_chain_floor: f64,
    pub supply_chain_weight: f64,
    pub min_probability: f64,
    pub max_probability: f64,
}

impl Default for RiskModel {
    fn default() -> Self {
        Self {
            lts_weight: 0.62,
            offset_weight: 0.35,
            vague_weight: 28.0,
            supply_chain_floor: 50.0,
            supply_chain_weight: 0.3,
            min_probability: 5.0,
            max_probability: 95.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceModel {
    pub empty_band: f64,
    pub min_band: f64,
    pub band_scale: f64,
}

impl Default for ConfidenceModel {
    fn default() -> Self {
        Self {
            empty_band: 6.0,
            min_band: 2.5,
            band_scale: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PercentileModel {
    pub min: u8,
    pub max: u8,
}

impl Default for PercentileModel {
    fn default() -> Self {
        Self { min: 1, max: 99 }
    }
}

/// Substitutions for fields the collaborator left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefaults {
    pub claim_confidence: f64,
    pub offset_dependency_pct: f64,
    pub offset_quality: OffsetQuality,
    pub grid_carbon_intensity: f64,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            claim_confidence: 0.6,
            offset_dependency_pct: 0.0,
            offset_quality: OffsetQuality::Unverified,
            grid_carbon_intensity: 400.0,
        }
    }
}

/// `Some(value)` only for finite numbers; everything else counts as missing.
pub(crate) fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}
