pub mod catalog;
pub mod condense;
pub mod patterns;
pub mod relevance;
pub mod synthesis;
pub mod voice;

use std::sync::Arc;

use serde::Serialize;
use shared_types::ComplianceRecord;

pub use catalog::{CatalogError, ComplianceCatalog};
pub use condense::condense_text;
pub use relevance::{relevance_match, score_records, QuestionProfile, ScoredRecord};
pub use synthesis::{synthesize, AnswerOptions, NO_MATCH_ANSWER};
pub use voice::{transform_to_vendor_response, vendor_voice_rules, RewriteRule};

/// Answer produced for one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub text: String,
    /// Names of the ranked records the answer drew on, best first
    pub sources: Vec<String>,
    pub vendor_directed: bool,
}

/// ComplianceEngine entry point
///
/// Holds a shared read-only catalog; every call is a pure function of the
/// question and that catalog.
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    catalog: Arc<ComplianceCatalog>,
}

impl ComplianceEngine {
    pub fn new(catalog: ComplianceCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    pub fn with_shared_catalog(catalog: Arc<ComplianceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ComplianceCatalog {
        &self.catalog
    }

    /// Records relevant to the question, best first
    pub fn rank(&self, question: &str, top_n: usize) -> Vec<&ComplianceRecord> {
        relevance_match(question, self.catalog.records(), top_n)
    }

    /// Records with their scores, for diagnostics
    pub fn scored(&self, question: &str) -> Vec<ScoredRecord<'_>> {
        score_records(question, self.catalog.records())
    }

    pub fn answer(&self, question: &str, options: &AnswerOptions) -> Answer {
        let matches = self.rank(question, options.top_n);
        Answer {
            text: synthesize(question, &matches, options),
            sources: matches.iter().map(|r| r.name.clone()).collect(),
            vendor_directed: patterns::is_vendor_directed(question),
        }
    }
}
