//! Rewriting third-person compliance language into first-person vendor voice
//!
//! Rules are applied in order, so a specific rule ("organizations must")
//! has to come before the generic one it would otherwise lose to ("must").

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::patterns::leading_word;

/// One ordered substitution
#[derive(Debug)]
pub struct RewriteRule {
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl RewriteRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

/// Third-person subjects that become "we", longest first
const SUBJECTS: &str = "service organizations|covered entities|obliged entities|financial institutions|organizations|organisations|companies|businesses|entities|they";

lazy_static! {
    static ref VENDOR_VOICE_RULES: Vec<RewriteRule> = vec![
        RewriteRule::new(
            &format!(r"(?i)\b(?:{}) (?:are required to|must|should|shall) be\b", SUBJECTS),
            "we are",
        ),
        RewriteRule::new(
            &format!(r"(?i)\b(?:{}) (?:are required to|must|shall)\b", SUBJECTS),
            "we do",
        ),
        RewriteRule::new(&format!(r"(?i)\b(?:{}) should\b", SUBJECTS), "we"),
        RewriteRule::new(
            r"(?i)\bthe organi[sz]ation (?:must|should|shall) be\b",
            "our organization is",
        ),
        RewriteRule::new(
            r"(?i)\bthe organi[sz]ation (?:must|shall)\b",
            "our organization does",
        ),
        RewriteRule::new(r"(?i)\bthe organi[sz]ation\b", "our organization"),
        RewriteRule::new(&format!(r"(?i)\b(?:{})\b", SUBJECTS), "we"),
        RewriteRule::new(r"(?i)\b(?:must|should|shall) be\b", "is"),
        // Remaining subjects are singular nouns ("Management", "the auditor")
        RewriteRule::new(r"(?i)\b(?:must|should|shall)\b", "does"),
        RewriteRule::new(r"(?i)\bare required to\b", "do"),
        RewriteRule::new(r"(?i)\btheir\b", "our"),
        RewriteRule::new(r"(?i)\bthem\b", "us"),
    ];

    /// A lower-case letter opening a sentence after the first
    static ref SENTENCE_START: Regex = Regex::new(r"([.!?]\s+)(\p{Ll})").unwrap();
}

/// The ordered rule list used by [`transform_to_vendor_response`]
pub fn vendor_voice_rules() -> &'static [RewriteRule] {
    &VENDOR_VOICE_RULES
}

/// Rewrite requirement text as a vendor describing its own practice
///
/// Already first-person text passes through unchanged apart from sentence
/// capitals.
pub fn transform_to_vendor_response(text: &str) -> String {
    let rewritten = vendor_voice_rules()
        .iter()
        .fold(text.trim().to_string(), |acc, rule| rule.apply(&acc));
    capitalize_sentences(&rewritten)
}

/// Upper-case the first letter of every sentence
fn capitalize_sentences(text: &str) -> String {
    let text = capitalize_first(text);
    SENTENCE_START
        .replace_all(&text, |caps: &Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned()
}

/// Whether text opens in first person, as rewritten fragments do
pub fn is_first_person(text: &str) -> bool {
    matches!(
        leading_word(text).as_deref(),
        Some("we" | "our" | "us")
    )
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first letter unless the first word looks like an
/// acronym ("GDPR requires...")
pub fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.clone().next()) {
        (Some(first), Some(second)) if second.is_uppercase() => {
            let mut out = String::with_capacity(text.len());
            out.push(first);
            out.extend(chars);
            out
        }
        (Some(first), _) => first.to_lowercase().chain(chars).collect(),
        (None, _) => String::new(),
    }
}
