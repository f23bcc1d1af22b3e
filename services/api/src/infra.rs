use autotruth::config::DataConfig;
use autotruth::disclosures::{ClaimCsvImporter, DatasetRegistry, DisclosureInput};
use autotruth::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

const BUNDLED_DATASET: &str = include_str!("../data/companies.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Configured dataset when `APP_DATASET_PATH` is set, the bundled sample
/// companies otherwise.
pub(crate) fn load_registry(data: &DataConfig) -> Result<DatasetRegistry, AppError> {
    match &data.dataset_path {
        Some(path) => Ok(DatasetRegistry::from_path(path)?),
        None => {
            let registry = DatasetRegistry::from_reader(BUNDLED_DATASET.as_bytes())?;
            info!(companies = registry.len(), "using bundled sample dataset");
            Ok(registry)
        }
    }
}

pub(crate) fn read_disclosure(path: &Path) -> Result<DisclosureInput, AppError> {
    let file = std::fs::File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

/// Disclosure from `path`, with its claims replaced by a CSV export when one
/// is given.
pub(crate) fn load_disclosure(
    path: &Path,
    claims_csv: Option<&Path>,
) -> Result<DisclosureInput, AppError> {
    let mut disclosure = read_disclosure(path)?;
    if let Some(csv_path) = claims_csv {
        disclosure.claims = ClaimCsvImporter::from_path(csv_path)?;
    }
    Ok(disclosure)
}
