pub mod config;
pub mod disclosures;
pub mod error;
pub mod scoring;
pub mod service;
pub mod telemetry;
