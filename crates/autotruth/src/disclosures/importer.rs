use super::input::ClaimInput;
use crate::scoring::{ClaimType, Pillar};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ClaimImportError {
    #[error("failed to read claims export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid claims CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: unknown pillar '{value}'")]
    UnknownPillar { line: usize, value: String },
    #[error("line {line}: claim text is empty")]
    EmptyText { line: usize },
}

/// Reads extracted claims from a CSV export with the columns
/// `text,type,pillar,confidence,verified[,rewrite_suggestion]`.
pub struct ClaimCsvImporter;

impl ClaimCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ClaimInput>, ClaimImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ClaimInput>, ClaimImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut claims = Vec::new();

        for (index, record) in csv_reader.deserialize::<ClaimRow>().enumerate() {
            let row = record?;
            // header occupies line 1
            let line = index + 2;
            claims.push(row.into_claim(line)?);
        }

        debug!(claims = claims.len(), "imported claims from CSV");
        Ok(claims)
    }
}

#[derive(Debug, Deserialize)]
struct ClaimRow {
    text: String,
    #[serde(rename = "type")]
    claim_type: String,
    pillar: String,
    #[serde(default)]
    confidence: Option<f64>,
    #[serde(default)]
    verified: Option<bool>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rewrite_suggestion: Option<String>,
}

impl ClaimRow {
    fn into_claim(self, line: usize) -> Result<ClaimInput, ClaimImportError> {
        if self.text.trim().is_empty() {
            return Err(ClaimImportError::EmptyText { line });
        }

        let pillar = Pillar::from_key(&self.pillar).ok_or(ClaimImportError::UnknownPillar {
            line,
            value: self.pillar.clone(),
        })?;

        Ok(ClaimInput {
            text: self.text,
            claim_type: ClaimType::from_tag(&self.claim_type),
            pillar,
            confidence: self.confidence,
            verified: self.verified,
            rewrite_suggestion: self.rewrite_suggestion,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const EXPORT: &str = "\
text,type,pillar,confidence,verified,rewrite_suggestion
Scope 1 emissions fell 18% against 2019.,NUMERIC,manufacturing,0.93,true,
We are committed to a sustainable future.,vague,supply_chain,,,
Residual emissions offset via REC purchases.,OFFSET_BACKED,offsets,0.85,false,Disclose the offset registry
Cell supplier audit passed (IRMA).,AUDITED,raw_materials,0.7,,
";

    #[test]
    fn imports_rows_in_order_with_defaults() {
        let claims = ClaimCsvImporter::from_reader(Cursor::new(EXPORT)).expect("imports");

        assert_eq!(claims.len(), 4);
        assert_eq!(claims[0].claim_type, ClaimType::Numeric);
        assert_eq!(claims[0].pillar, Pillar::Manufacturing);
        assert_eq!(claims[0].confidence, Some(0.93));
        assert_eq!(claims[0].verified, Some(true));
        assert!(claims[0].rewrite_suggestion.is_none());

        assert_eq!(claims[1].claim_type, ClaimType::Vague);
        assert_eq!(claims[1].confidence, None);
        assert_eq!(claims[1].verified, None);

        assert_eq!(
            claims[2].rewrite_suggestion.as_deref(),
            Some("Disclose the offset registry")
        );
        assert_eq!(claims[3].claim_type, ClaimType::Other);
    }

    #[test]
    fn rejects_unknown_pillar_with_line_number() {
        let export = "text,type,pillar,confidence,verified\nWater use halved.,NUMERIC,water,0.9,true\n";
        let err = ClaimCsvImporter::from_reader(Cursor::new(export)).expect_err("rejects");
        assert!(matches!(
            err,
            ClaimImportError::UnknownPillar { line: 2, ref value } if value == "water"
        ));
    }

    #[test]
    fn rejects_non_numeric_confidence() {
        let export = "text,type,pillar,confidence,verified\nPack recycling.,NUMERIC,end_of_life,high,true\n";
        let err = ClaimCsvImporter::from_reader(Cursor::new(export)).expect_err("rejects");
        assert!(matches!(err, ClaimImportError::Csv(_)));
    }
}
