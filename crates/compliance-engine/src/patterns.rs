//! Fixed vocabularies used by the relevance matcher and answer synthesizer

/// Category names paired with the lower-cased keywords that signal them
/// in a question. The category name itself is always one of its triggers.
pub const CATEGORY_VOCABULARY: &[(&str, &[&str])] = &[
    (
        "Data Privacy",
        &[
            "data privacy",
            "privacy",
            "personal data",
            "personal information",
            "data protection",
            "consent",
            "gdpr",
            "ccpa",
            "data",
        ],
    ),
    (
        "Cybersecurity",
        &[
            "cybersecurity",
            "cyber",
            "security",
            "encrypt",
            "breach",
            "access control",
            "vulnerability",
            "incident",
            "penetration",
            "firewall",
            "password",
        ],
    ),
    (
        "Financial Crime",
        &[
            "financial crime",
            "money laundering",
            "anti-money",
            "aml",
            "kyc",
            "sanctions",
            "fraud",
            "terrorist financing",
        ],
    ),
    (
        "Anti-Bribery",
        &[
            "anti-bribery",
            "bribery",
            "bribe",
            "corruption",
            "kickback",
            "facilitation payment",
        ],
    ),
    (
        "Healthcare",
        &["healthcare", "health", "patient", "medical", "hipaa"],
    ),
    (
        "Financial Reporting",
        &[
            "financial reporting",
            "financial statement",
            "internal control",
            "audit",
            "sox",
        ],
    ),
];

/// Known compliance phrases. A phrase found in the question earns points
/// for every record whose text also contains it.
pub const KEY_PHRASES: &[&str] = &[
    "data encryption",
    "encryption",
    "encrypt",
    "at rest",
    "in transit",
    "data at rest",
    "cross border",
    "cross-border",
    "data transfer",
    "access control",
    "multi-factor",
    "incident response",
    "breach notification",
    "risk assessment",
    "risk management",
    "vendor management",
    "third party",
    "due diligence",
    "background check",
    "penetration test",
    "vulnerability",
    "business continuity",
    "disaster recovery",
    "data retention",
    "personal data",
    "data subject",
    "consent",
    "money laundering",
    "sanctions screening",
    "anti-bribery",
    "internal controls",
    "audit",
    "training",
    "logging",
    "monitoring",
];

/// Question words that never count as content words
pub const STOP_WORDS: &[&str] = &[
    "what", "when", "where", "which", "how", "does", "your", "our", "with",
];

/// Words of this many characters or fewer are ignored when tokenizing
pub const MIN_WORD_LEN: usize = 3;

/// Phrases that mark a question as addressed to the vendor itself
pub const VENDOR_DIRECTED_PHRASES: &[&str] = &[
    "do you",
    "does your",
    "are you",
    "is your",
    "have you",
    "has your",
    "can you",
    "will you",
    "would you",
    "did you",
    "your company",
    "your organization",
    "your organisation",
    "your team",
    "your employees",
    "your staff",
    "your policy",
    "your policies",
    "your process",
    "your procedures",
    "your systems",
    "your vendors",
    "are you certified",
    "are you compliant",
    "how do you",
    "how does your",
    "describe your",
];

/// Leading words of a yes/no question
pub const YES_NO_LEADS: &[&str] = &[
    "do", "does", "did", "are", "is", "was", "have", "has", "can", "will", "would", "should",
];

/// Leading words of an open question
pub const OPEN_QUESTION_LEADS: &[&str] = &["how", "what", "describe", "explain", "which"];

/// Keyword groups that select the canned context paragraph, checked in order
pub const DATA_PRIVACY_KEYWORDS: &[&str] = &[
    "privacy",
    "personal data",
    "personal information",
    "data protection",
    "gdpr",
    "ccpa",
    "pii",
];

pub const FINANCIAL_CRIME_KEYWORDS: &[&str] = &[
    "money laundering",
    "aml",
    "kyc",
    "sanctions",
    "financial crime",
    "fraud",
];

pub const ANTI_BRIBERY_KEYWORDS: &[&str] =
    &["bribery", "bribe", "corruption", "fcpa", "kickback"];

pub const CYBERSECURITY_KEYWORDS: &[&str] = &[
    "security",
    "encrypt",
    "cyber",
    "breach",
    "access control",
    "vulnerability",
    "incident",
];

/// Check whether any keyword appears in already lower-cased text
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Check whether a question is phrased as asking the vendor
/// about its own practices
pub fn is_vendor_directed(question: &str) -> bool {
    contains_any(&question.to_lowercase(), VENDOR_DIRECTED_PHRASES)
}

/// First alphanumeric word of the question, lower-cased
pub fn leading_word(question: &str) -> Option<String> {
    question
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}
