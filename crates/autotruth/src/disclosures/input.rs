use crate::scoring::{ClaimType, OffsetQuality, Pillar};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pre-extracted claim as handed over by the extraction collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimInput {
    pub text: String,
    #[serde(rename = "type")]
    pub claim_type: ClaimType,
    pub pillar: Pillar,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub rewrite_suggestion: Option<String>,
}

/// Claims and metrics for one company, model and reporting year. Every
/// field may be absent; the engine substitutes its configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisclosureInput {
    #[serde(default, alias = "company")]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub report_year: Option<i32>,
    #[serde(default)]
    pub claims: Vec<ClaimInput>,
    #[serde(default)]
    pub pillar_scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub prior_year_scores: BTreeMap<String, f64>,
    #[serde(default, alias = "offset_dependency_pct")]
    pub offset_dependency: Option<f64>,
    #[serde(default)]
    pub offset_quality: Option<OffsetQuality>,
    #[serde(default)]
    pub regulatory_alignment: BTreeMap<String, bool>,
    #[serde(default, alias = "grid_carbon_intensity")]
    pub grid_carbon_intensity_gco2_kwh: Option<f64>,
}

impl DisclosureInput {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed disclosure")
    }
}
