//! Heuristic relevance scoring of compliance records against a question
//!
//! Scoring is purely lexical. Every signal is a lower-cased substring test,
//! and the per-record score is the sum of fixed bonuses:
//!
//! | Signal                                   | Points |
//! |------------------------------------------|--------|
//! | record category matched by the question  | 10     |
//! | each record domain found in the question | 5      |
//! | record name found in the question        | 15     |
//! | record jurisdiction found in the question| 3      |
//! | key phrase found in description          | 3      |
//! | key phrase found in requirement          | 4      |
//! | content word found in description        | 1      |
//! | content word found in requirement        | 2      |

use shared_types::ComplianceRecord;

use crate::patterns::{CATEGORY_VOCABULARY, KEY_PHRASES, MIN_WORD_LEN, STOP_WORDS};

pub const CATEGORY_BONUS: u32 = 10;
pub const DOMAIN_BONUS: u32 = 5;
pub const NAME_BONUS: u32 = 15;
pub const JURISDICTION_BONUS: u32 = 3;
pub const PHRASE_IN_DESCRIPTION: u32 = 3;
pub const PHRASE_IN_REQUIREMENT: u32 = 4;
pub const WORD_IN_DESCRIPTION: u32 = 1;
pub const WORD_IN_REQUIREMENT: u32 = 2;

/// Signals extracted once from a question and reused for every record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionProfile {
    /// Lower-cased question text
    pub normalized: String,
    /// Lower-cased names of the categories the question touches
    pub matched_categories: Vec<String>,
    /// Known compliance phrases present in the question
    pub key_phrases: Vec<&'static str>,
    /// Content words: longer than the minimum length and not stop words
    pub words: Vec<String>,
}

impl QuestionProfile {
    pub fn new(question: &str) -> Self {
        let normalized = question.to_lowercase();

        let matched_categories = CATEGORY_VOCABULARY
            .iter()
            .filter(|(_, triggers)| triggers.iter().any(|t| normalized.contains(t)))
            .map(|(category, _)| category.to_lowercase())
            .collect();

        let key_phrases = KEY_PHRASES
            .iter()
            .copied()
            .filter(|phrase| normalized.contains(phrase))
            .collect();

        let words = normalized
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() > MIN_WORD_LEN && !STOP_WORDS.contains(w))
            .map(str::to_string)
            .collect();

        Self {
            normalized,
            matched_categories,
            key_phrases,
            words,
        }
    }

    /// Substring test that never matches on an empty needle
    fn mentions(&self, needle: &str) -> bool {
        !needle.is_empty() && self.normalized.contains(needle)
    }
}

/// A record paired with its transient relevance score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredRecord<'a> {
    pub record: &'a ComplianceRecord,
    pub relevance_score: u32,
}

/// Score a single record against an already profiled question
pub fn score_record(profile: &QuestionProfile, record: &ComplianceRecord) -> u32 {
    let mut score = 0;

    let category = record.category.trim().to_lowercase();
    if !category.is_empty() && profile.matched_categories.contains(&category) {
        score += CATEGORY_BONUS;
    }

    for domain in &record.domains {
        if profile.mentions(&domain.trim().to_lowercase()) {
            score += DOMAIN_BONUS;
        }
    }

    if profile.mentions(&record.name.trim().to_lowercase()) {
        score += NAME_BONUS;
    }

    if profile.mentions(&record.jurisdiction_str().trim().to_lowercase()) {
        score += JURISDICTION_BONUS;
    }

    let description = record.description.to_lowercase();
    let requirement = record.requirement_str().to_lowercase();

    for phrase in &profile.key_phrases {
        if description.contains(phrase) {
            score += PHRASE_IN_DESCRIPTION;
        }
        if requirement.contains(phrase) {
            score += PHRASE_IN_REQUIREMENT;
        }
    }

    for word in &profile.words {
        if description.contains(word.as_str()) {
            score += WORD_IN_DESCRIPTION;
        }
        if requirement.contains(word.as_str()) {
            score += WORD_IN_REQUIREMENT;
        }
    }

    score
}

/// Score every record and keep the non-zero ones, best first
///
/// Ties keep catalog order.
pub fn score_records<'a>(question: &str, records: &'a [ComplianceRecord]) -> Vec<ScoredRecord<'a>> {
    if records.is_empty() {
        return Vec::new();
    }

    let profile = QuestionProfile::new(question);
    let mut scored: Vec<ScoredRecord<'a>> = records
        .iter()
        .map(|record| ScoredRecord {
            record,
            relevance_score: score_record(&profile, record),
        })
        .filter(|s| s.relevance_score > 0)
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    scored
}

/// Return at most `top_n` records relevant to the question, best first
pub fn relevance_match<'a>(
    question: &str,
    records: &'a [ComplianceRecord],
    top_n: usize,
) -> Vec<&'a ComplianceRecord> {
    score_records(question, records)
        .into_iter()
        .take(top_n)
        .map(|s| s.record)
        .collect()
}
