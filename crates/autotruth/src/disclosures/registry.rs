use super::input::DisclosureInput;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// One stored company/model disclosure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(flatten)]
    pub disclosure: DisclosureInput,
}

impl CompanyRecord {
    pub fn summary(&self) -> CompanySummary {
        let logo = self.logo.clone().unwrap_or_else(|| {
            self.disclosure
                .display_name()
                .chars()
                .next()
                .map(|initial| initial.to_ascii_uppercase().to_string())
                .unwrap_or_else(|| "E".to_string())
        });

        CompanySummary {
            id: self.id.clone(),
            name: self.disclosure.display_name().to_string(),
            logo,
            model: self.disclosure.model.clone(),
            model_count: self.models.len(),
        }
    }
}

/// Listing entry exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanySummary {
    pub id: String,
    pub name: String,
    pub logo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub model_count: usize,
}

/// Storage abstraction for stored disclosures so routes can be exercised
/// against in-memory fixtures.
pub trait DisclosureRegistry: Send + Sync {
    fn companies(&self) -> Result<Vec<CompanySummary>, RegistryError>;
    fn fetch(&self, id: &str) -> Result<Option<CompanyRecord>, RegistryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read company dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid company dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate company id '{0}' in dataset")]
    DuplicateId(String),
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Deserialize)]
struct Dataset {
    companies: Vec<CompanyRecord>,
}

/// Read-only registry backed by a JSON dataset loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct DatasetRegistry {
    records: Vec<CompanyRecord>,
}

impl DatasetRegistry {
    pub fn new(records: Vec<CompanyRecord>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(RegistryError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RegistryError> {
        let file = std::fs::File::open(path.as_ref())?;
        let registry = Self::from_reader(file)?;
        info!(
            path = %path.as_ref().display(),
            companies = registry.len(),
            "loaded company dataset"
        );
        Ok(registry)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        let dataset: Dataset = serde_json::from_reader(reader)?;
        Self::new(dataset.companies)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DisclosureRegistry for DatasetRegistry {
    fn companies(&self) -> Result<Vec<CompanySummary>, RegistryError> {
        Ok(self.records.iter().map(CompanyRecord::summary).collect())
    }

    fn fetch(&self, id: &str) -> Result<Option<CompanyRecord>, RegistryError> {
        Ok(self.records.iter().find(|record| record.id == id).cloned())
    }
}
