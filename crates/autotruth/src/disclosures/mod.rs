//! Boundary between the scoring engine and its collaborators: the records a
//! claims/metrics provider hands over, a CSV claim importer, and the company
//! registry that serves stored disclosures.

mod importer;
mod input;
mod registry;

pub use importer::{ClaimCsvImporter, ClaimImportError};
pub use input::{ClaimInput, DisclosureInput};
pub use registry::{
    CompanyRecord, CompanySummary, DatasetRegistry, DisclosureRegistry, RegistryError,
};
