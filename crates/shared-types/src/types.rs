use serde::{Deserialize, Deserializer, Serialize};

/// One compliance framework or regulation in the static catalog
///
/// Every field except `name` is optional in the source JSON. Missing or
/// `null` text fields come through as empty strings so that scoring never
/// has to care about absence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComplianceRecord {
    pub name: String, // e.g., "GDPR"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>, // e.g., "EU", "Global"
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String, // e.g., "Data Privacy"
    #[serde(default, deserialize_with = "null_as_default")]
    pub domains: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,
}

/// Treat an explicit `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ComplianceRecord {
    pub fn jurisdiction_str(&self) -> &str {
        self.jurisdiction.as_deref().unwrap_or("")
    }

    pub fn requirement_str(&self) -> &str {
        self.requirement.as_deref().unwrap_or("")
    }

    /// Text used when quoting this record in an answer: the requirement
    /// when present, the description otherwise
    pub fn obligation_text(&self) -> &str {
        let requirement = self.requirement_str().trim();
        if requirement.is_empty() {
            self.description.trim()
        } else {
            requirement
        }
    }
}

/// Public summary of a record, without the long-form text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub name: String,
    pub jurisdiction: Option<String>,
    pub category: String,
    pub domains: Vec<String>,
}

impl From<&ComplianceRecord> for RecordSummary {
    fn from(record: &ComplianceRecord) -> Self {
        Self {
            name: record.name.clone(),
            jurisdiction: record.jurisdiction.clone(),
            category: record.category.clone(),
            domains: record.domains.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record: ComplianceRecord = serde_json::from_str(r#"{"name": "SOC 2"}"#).unwrap();
        assert_eq!(record.name, "SOC 2");
        assert_eq!(record.jurisdiction_str(), "");
        assert_eq!(record.requirement_str(), "");
        assert!(record.category.is_empty());
        assert!(record.domains.is_empty());
        assert!(record.description.is_empty());
    }

    #[test]
    fn test_null_fields_default_to_empty() {
        let record: ComplianceRecord = serde_json::from_str(
            r#"{"name": "A", "jurisdiction": null, "category": null, "domains": null,
                "description": null, "requirement": null}"#,
        )
        .unwrap();
        assert_eq!(record.jurisdiction, None);
        assert!(record.category.is_empty());
        assert!(record.domains.is_empty());
        assert!(record.description.is_empty());
        assert_eq!(record.obligation_text(), "");
    }

    #[test]
    fn test_obligation_text_prefers_requirement() {
        let record = ComplianceRecord {
            name: "GDPR".to_string(),
            description: "EU data protection regulation.".to_string(),
            requirement: Some("Organizations must appoint a DPO.".to_string()),
            ..Default::default()
        };
        assert_eq!(record.obligation_text(), "Organizations must appoint a DPO.");
    }

    #[test]
    fn test_obligation_text_falls_back_to_description() {
        let record = ComplianceRecord {
            name: "GDPR".to_string(),
            description: "EU data protection regulation.".to_string(),
            requirement: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(record.obligation_text(), "EU data protection regulation.");
    }

    #[test]
    fn test_summary_drops_long_text() {
        let record = ComplianceRecord {
            name: "PCI DSS".to_string(),
            jurisdiction: Some("Global".to_string()),
            category: "Cybersecurity".to_string(),
            domains: vec!["payments".to_string()],
            description: "Card data security standard.".to_string(),
            requirement: None,
        };
        let summary = RecordSummary::from(&record);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["name"], "PCI DSS");
        assert!(json.get("description").is_none());
    }
}
