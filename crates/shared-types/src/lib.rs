pub mod types;

pub use types::{ComplianceRecord, RecordSummary};
