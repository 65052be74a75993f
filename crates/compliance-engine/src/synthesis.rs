//! Answer synthesis from ranked compliance records
//!
//! Two answer styles share one entry point:
//!
//! - **Simple**: a canned context paragraph for the question's topic, then
//!   a sentence naming up to two matched frameworks. Record text is not
//!   quoted.
//! - **Vendor**: quotes the obligations of up to three matched records,
//!   condensed and rewritten in first person, with a lead-in and closing
//!   line when the question is addressed to the vendor.

use serde::{Deserialize, Serialize};
use shared_types::ComplianceRecord;

use crate::condense::condense_text;
use crate::patterns::{
    contains_any, is_vendor_directed, leading_word, ANTI_BRIBERY_KEYWORDS,
    CYBERSECURITY_KEYWORDS, DATA_PRIVACY_KEYWORDS, FINANCIAL_CRIME_KEYWORDS, OPEN_QUESTION_LEADS,
    YES_NO_LEADS,
};
use crate::voice::{is_first_person, lowercase_first, transform_to_vendor_response};

/// Characters kept from each quoted record
pub const FRAGMENT_MAX_LEN: usize = 200;

/// Records quoted in a vendor-style answer
pub const MAX_FRAGMENTS: usize = 3;

/// Frameworks named in a simple answer
pub const MAX_NAMED_FRAMEWORKS: usize = 2;

pub const NO_MATCH_ANSWER: &str = "We maintain a comprehensive compliance program aligned with applicable regulatory requirements. Please contact our compliance team for details specific to this question.";

pub const VENDOR_CLOSING: &str =
    "Supporting documentation and evidence of these controls are available upon request.";

const DATA_PRIVACY_CONTEXT: &str = "Protecting personal data is central to our operations. We process personal information only for defined purposes and apply privacy-by-design principles across our products.";

const FINANCIAL_CRIME_CONTEXT: &str = "We operate a risk-based financial crime program covering anti-money laundering, customer due diligence and sanctions screening.";

const ANTI_BRIBERY_CONTEXT: &str = "We prohibit bribery and corruption in all forms and apply anti-bribery controls to our employees, agents and business partners.";

const CYBERSECURITY_CONTEXT: &str = "Our information security program applies layered technical and organizational controls to protect the confidentiality, integrity and availability of customer data.";

/// Knobs that select an answer style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOptions {
    /// Maximum records taken from the ranking
    pub top_n: usize,
    /// Quote record text in first-person vendor voice
    pub vendor_style: bool,
}

impl AnswerOptions {
    /// Settings of the primary answer endpoint
    pub fn simple() -> Self {
        Self {
            top_n: 3,
            vendor_style: false,
        }
    }

    /// Settings of the fallback answer endpoint
    pub fn vendor() -> Self {
        Self {
            top_n: 5,
            vendor_style: true,
        }
    }
}

impl Default for AnswerOptions {
    fn default() -> Self {
        Self::simple()
    }
}

/// How a vendor-directed answer opens, chosen from the question's first word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lead {
    /// "Do you...?" style questions
    Affirmative,
    /// "How do you...?" style questions
    Descriptive,
    /// Anything else
    Assertive,
}

impl Lead {
    pub fn for_question(question: &str) -> Self {
        match leading_word(question) {
            Some(word) if YES_NO_LEADS.contains(&word.as_str()) => Lead::Affirmative,
            Some(word) if OPEN_QUESTION_LEADS.contains(&word.as_str()) => Lead::Descriptive,
            _ => Lead::Assertive,
        }
    }

    fn open(&self, body: &str) -> String {
        match self {
            Lead::Affirmative => format!("Yes, {}", continue_sentence(body)),
            Lead::Descriptive => {
                format!("Our organization addresses this as follows. {}", body)
            }
            Lead::Assertive => format!("We maintain documented controls in this area. {}", body),
        }
    }
}

/// Build an answer to `question` from records already ranked best first
pub fn synthesize(
    question: &str,
    matches: &[&ComplianceRecord],
    options: &AnswerOptions,
) -> String {
    let matches = &matches[..matches.len().min(options.top_n)];
    if options.vendor_style {
        synthesize_vendor(question, matches)
    } else {
        synthesize_simple(question, matches)
    }
}

/// Canned topic paragraph for a question, if any topic keyword is present
pub fn category_context(question: &str) -> Option<&'static str> {
    let question = question.to_lowercase();
    [
        (DATA_PRIVACY_KEYWORDS, DATA_PRIVACY_CONTEXT),
        (FINANCIAL_CRIME_KEYWORDS, FINANCIAL_CRIME_CONTEXT),
        (ANTI_BRIBERY_KEYWORDS, ANTI_BRIBERY_CONTEXT),
        (CYBERSECURITY_KEYWORDS, CYBERSECURITY_CONTEXT),
    ]
    .into_iter()
    .find(|(keywords, _)| contains_any(&question, keywords))
    .map(|(_, context)| context)
}

fn synthesize_simple(question: &str, matches: &[&ComplianceRecord]) -> String {
    let closing = if matches.is_empty() {
        NO_MATCH_ANSWER.to_string()
    } else {
        framework_sentence(question, matches)
    };

    match category_context(question) {
        Some(context) => format!("{} {}", context, closing),
        None => closing,
    }
}

/// Sentence naming the leading frameworks, worded for the asker's role
fn framework_sentence(question: &str, matches: &[&ComplianceRecord]) -> String {
    let names: Vec<&str> = matches
        .iter()
        .map(|r| r.name.trim())
        .filter(|n| !n.is_empty())
        .take(MAX_NAMED_FRAMEWORKS)
        .collect();

    let listed = match names.as_slice() {
        [] => "the applicable frameworks".to_string(),
        [only] => only.to_string(),
        [first, second, ..] => format!("{} and {}", first, second),
    };
    let remainder = if matches.len() > names.len() && !names.is_empty() {
        ", among other applicable frameworks"
    } else {
        ""
    };

    if is_vendor_directed(question) {
        format!("We align our compliance program with {}{}.", listed, remainder)
    } else {
        format!(
            "The most relevant frameworks for this question include {}{}.",
            listed, remainder
        )
    }
}

fn synthesize_vendor(question: &str, matches: &[&ComplianceRecord]) -> String {
    let fragments = vendor_fragments(matches);
    if fragments.is_empty() {
        return NO_MATCH_ANSWER.to_string();
    }

    let body = fragments
        .iter()
        .enumerate()
        .map(|(i, fragment)| {
            if i == 0 {
                fragment.clone()
            } else {
                format!("Additionally, {}", continue_sentence(fragment))
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    if is_vendor_directed(question) {
        format!("{} {}", Lead::for_question(question).open(&body), VENDOR_CLOSING)
    } else {
        body
    }
}

/// Lower-case a first-person fragment that follows a lead-in; quoted
/// text keeps its capitals ("California law...")
fn continue_sentence(fragment: &str) -> String {
    if is_first_person(fragment) {
        lowercase_first(fragment)
    } else {
        fragment.to_string()
    }
}

/// First-person fragments from the top records, one per distinct name
fn vendor_fragments(matches: &[&ComplianceRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut fragments = Vec::new();

    for record in matches {
        if fragments.len() == MAX_FRAGMENTS {
            break;
        }
        let key = record.name.trim().to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);

        let text = record.obligation_text();
        if text.is_empty() {
            continue;
        }
        let fragment = transform_to_vendor_response(&condense_text(text, FRAGMENT_MAX_LEN));
        fragments.push(terminate(fragment));
    }

    fragments
}

fn terminate(mut sentence: String) -> String {
    if !sentence.ends_with(['.', '!', '?']) {
        sentence.push('.');
    }
    sentence
}
