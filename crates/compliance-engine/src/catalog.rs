//! Static catalog of compliance records
//!
//! The catalog is read once at start-up and never mutated. Callers build it
//! explicitly and hand it to [`crate::ComplianceEngine`].

use std::path::Path;

use shared_types::ComplianceRecord;
use thiserror::Error;

/// Default dataset - loaded from data/compliance_records.json
const EMBEDDED_RECORDS: &str = include_str!("../data/compliance_records.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read records from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid records JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplianceCatalog {
    records: Vec<ComplianceRecord>,
}

impl ComplianceCatalog {
    pub fn new(records: Vec<ComplianceRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of records
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ComplianceRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }

    /// Read and parse a JSON records file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The dataset compiled into the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_RECORDS)
    }

    pub fn records(&self) -> &[ComplianceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive lookup by framework name
    pub fn get(&self, name: &str) -> Option<&ComplianceRecord> {
        let name = name.trim();
        self.records
            .iter()
            .find(|r| r.name.trim().eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }
}
