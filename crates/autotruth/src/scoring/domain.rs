use serde::{Deserialize, Deserializer, Serialize};

/// One of the six fixed lifecycle dimensions a disclosure is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    RawMaterials,
    Manufacturing,
    SupplyChain,
    UsePhase,
    EndOfLife,
    Offsets,
}

impl Pillar {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::RawMaterials,
            Self::Manufacturing,
            Self::SupplyChain,
            Self::UsePhase,
            Self::EndOfLife,
            Self::Offsets,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::RawMaterials => "raw_materials",
            Self::Manufacturing => "manufacturing",
            Self::SupplyChain => "supply_chain",
            Self::UsePhase => "use_phase",
            Self::EndOfLife => "end_of_life",
            Self::Offsets => "offsets",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RawMaterials => "Raw Material Extraction",
            Self::Manufacturing => "Manufacturing & Energy",
            Self::SupplyChain => "Supply Chain (Scope 3)",
            Self::UsePhase => "Use Phase (Grid Carbon)",
            Self::EndOfLife => "Battery End-of-Life",
            Self::Offsets => "Offset Strategy",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|pillar| pillar.key().eq_ignore_ascii_case(key.trim()))
    }
}

const PILLAR_KEYS: &[&str] = &[
    "raw_materials",
    "manufacturing",
    "supply_chain",
    "use_phase",
    "end_of_life",
    "offsets",
];

/// Same rules as the CSV importer: trimmed, case-insensitive keys.
impl<'de> Deserialize<'de> for Pillar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        Self::from_key(&key).ok_or_else(|| serde::de::Error::unknown_variant(&key, PILLAR_KEYS))
    }
}

/// Exactly one value per pillar. Field access goes through an exhaustive
/// match so a new pillar cannot be silently skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PillarMap<T> {
    pub raw_materials: T,
    pub manufacturing: T,
    pub supply_chain: T,
    pub use_phase: T,
    pub end_of_life: T,
    pub offsets: T,
}

impl<T> PillarMap<T> {
    pub fn from_fn(mut f: impl FnMut(Pillar) -> T) -> Self {
        Self {
            raw_materials: f(Pillar::RawMaterials),
            manufacturing: f(Pillar::Manufacturing),
            supply_chain: f(Pillar::SupplyChain),
            use_phase: f(Pillar::UsePhase),
            end_of_life: f(Pillar::EndOfLife),
            offsets: f(Pillar::Offsets),
        }
    }

    pub fn get(&self, pillar: Pillar) -> &T {
        match pillar {
            Pillar::RawMaterials => &self.raw_materials,
            Pillar::Manufacturing => &self.manufacturing,
            Pillar::SupplyChain => &self.supply_chain,
            Pillar::UsePhase => &self.use_phase,
            Pillar::EndOfLife => &self.end_of_life,
            Pillar::Offsets => &self.offsets,
        }
    }

    pub fn get_mut(&mut self, pillar: Pillar) -> &mut T {
        match pillar {
            Pillar::RawMaterials => &mut self.raw_materials,
            Pillar::Manufacturing => &mut self.manufacturing,
            Pillar::SupplyChain => &mut self.supply_chain,
            Pillar::UsePhase => &mut self.use_phase,
            Pillar::EndOfLife => &mut self.end_of_life,
            Pillar::Offsets => &mut self.offsets,
        }
    }

    /// Entries in canonical pillar order.
    pub fn iter(&self) -> impl Iterator<Item = (Pillar, &T)> + '_ {
        Pillar::ordered()
            .into_iter()
            .map(move |pillar| (pillar, self.get(pillar)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Pillar, &T) -> U) -> PillarMap<U> {
        PillarMap::from_fn(|pillar| f(pillar, self.get(pillar)))
    }
}

pub type PillarScores = PillarMap<f64>;

impl PillarMap<f64> {
    /// Score clamped to the nominal [0, 100] range for rendering. Stored
    /// values are left untouched.
    pub fn display_value(&self, pillar: Pillar) -> f64 {
        let value = *self.get(pillar);
        if value.is_finite() {
            value.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// Evidence class assigned by the extraction collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimType {
    Numeric,
    Vague,
    OffsetBacked,
    Other,
}

impl<'de> Deserialize<'de> for ClaimType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

impl ClaimType {
    /// Case-insensitive parse of the wire tag; unknown tags map to `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_uppercase().replace(&['-', ' '][..], "_").as_str() {
            "NUMERIC" => Self::Numeric,
            "VAGUE" => Self::Vague,
            "OFFSET_BACKED" => Self::OffsetBacked,
            _ => Self::Other,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Numeric => "Numeric",
            Self::Vague => "Vague",
            Self::OffsetBacked => "Offset-backed",
            Self::Other => "Other evidence",
        }
    }
}

/// One disclosure statement after fingerprinting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub text: String,
    #[serde(rename = "type")]
    pub claim_type: ClaimType,
    pub pillar: Pillar,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub impact_score: f64,
    #[serde(default)]
    pub rewrite_suggestion: Option<String>,
}

/// Year-over-year direction of a pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improved,
    Stable,
    Declined,
}

impl Trend {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Improved => "Improved",
            Self::Stable => "Stable",
            Self::Declined => "Declined",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftEntry {
    pub current: f64,
    pub previous: f64,
    pub delta: f64,
    pub trend: Trend,
}

impl Default for DriftEntry {
    fn default() -> Self {
        Self {
            current: 0.0,
            previous: 0.0,
            delta: 0.0,
            trend: Trend::Stable,
        }
    }
}

pub type TemporalDrift = PillarMap<DriftEntry>;

/// Values too large to scale are returned as is; they carry no fractional
/// digits at that magnitude anyway.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    }
}
