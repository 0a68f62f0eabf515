//! Keyword and pattern classifiers
//!
//! Every classifier is a pure function over normalized text or the raw
//! subject. Rules live in ordered tables and the first match wins.

use crate::types::{HtmlFacts, Link};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Label chosen by the first rule whose keywords appear in the text
struct KeywordRule<L> {
    label: L,
    /// Matched against the lower-cased text
    any_of: &'static [&'static str],
    /// Matched against the text as written
    exact: &'static [&'static str],
}

impl<L: Copy> KeywordRule<L> {
    fn matches(&self, text: &str, lower: &str) -> bool {
        self.any_of.iter().any(|kw| lower.contains(kw)) || self.exact.iter().any(|kw| text.contains(kw))
    }
}

fn first_match<L: Copy>(rules: &[KeywordRule<L>], text: &str, fallback: L) -> L {
    let lower = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(text, &lower))
        .map_or(fallback, |rule| rule.label)
}

// --- Tone ---

const CASUAL_MARKERS: [&str; 5] = ["hey", "yo", "lol", "thanks", "cheers"];
const FORMAL_MARKERS: [&str; 3] = ["regards", "dear", "sincerely"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Casual,
    Formal,
}

impl Tone {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Casual => "Casual",
            Self::Formal => "Formal",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tone verdict along with the marker counts behind it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToneAssessment {
    pub tone: Tone,
    pub casual_count: usize,
    pub formal_count: usize,
}

impl ToneAssessment {
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        if self.casual_count > 0 {
            "Casual indicators found in text"
        } else {
            "Formal indicators found in text"
        }
    }
}

/// Each marker counts once when it occurs anywhere; ties are formal
#[must_use]
pub fn classify_tone(text: &str) -> ToneAssessment {
    let lower = text.to_lowercase();
    let count = |markers: &[&str]| markers.iter().filter(|m| lower.contains(*m)).count();

    let casual_count = count(&CASUAL_MARKERS);
    let formal_count = count(&FORMAL_MARKERS);
    let tone = if casual_count > formal_count {
        Tone::Casual
    } else {
        Tone::Formal
    };

    ToneAssessment {
        tone,
        casual_count,
        formal_count,
    }
}

// --- Email type ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmailType {
    Newsletter,
    QAndA,
    Pitch,
    General,
}

impl EmailType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newsletter => "Newsletter",
            Self::QAndA => "Q&A",
            Self::Pitch => "Pitch",
            Self::General => "General",
        }
    }
}

impl fmt::Display for EmailType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const EMAIL_TYPE_RULES: [KeywordRule<EmailType>; 3] = [
    KeywordRule {
        label: EmailType::Newsletter,
        any_of: &["newsletter"],
        exact: &[],
    },
    KeywordRule {
        label: EmailType::QAndA,
        any_of: &["question"],
        exact: &["Q&A"],
    },
    KeywordRule {
        label: EmailType::Pitch,
        any_of: &["pitch"],
        exact: &[],
    },
];

#[must_use]
pub fn classify_email_type(text: &str) -> EmailType {
    first_match(&EMAIL_TYPE_RULES, text, EmailType::General)
}

// --- Value category ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueCategory {
    Educational,
    Entertainment,
    Promotional,
    Other,
}

impl ValueCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Educational => "Educational",
            Self::Entertainment => "Entertainment",
            Self::Promotional => "Promotional",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const VALUE_RULES: [KeywordRule<ValueCategory>; 3] = [
    KeywordRule {
        label: ValueCategory::Educational,
        any_of: &["learn", "how to"],
        exact: &[],
    },
    KeywordRule {
        label: ValueCategory::Entertainment,
        any_of: &["fun", "joke"],
        exact: &[],
    },
    KeywordRule {
        label: ValueCategory::Promotional,
        any_of: &["buy now", "offer"],
        exact: &[],
    },
];

#[must_use]
pub fn classify_value(text: &str) -> ValueCategory {
    first_match(&VALUE_RULES, text, ValueCategory::Other)
}

// --- Subject emotion ---

static CURIOSITY_MARKERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[!?🔥]").unwrap());

const EMOTION_KEYWORDS: [(&str, &str); 6] = [
    ("amazing", "amazement"),
    ("love", "positive sentiment"),
    ("hate", "negative sentiment"),
    ("exclusive", "exclusivity"),
    ("secret", "intrigue"),
    ("shocking", "surprise"),
];

/// Keywords that feed the short label only, never the reason
const LABEL_ONLY_KEYWORDS: [(&str, &str); 1] = [("unbelievable", "astonishment")];

/// Curiosity and emotional triggers found in a subject line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubjectEmotion {
    /// Subject uses `!`, `?` or a fire emoji
    pub curiosity: bool,

    /// Descriptions of matched emotion keywords, in table order
    pub emotions: Vec<&'static str>,

    /// Descriptions matched by label-only keywords, listed after `emotions`
    pub label_only: Vec<&'static str>,
}

impl SubjectEmotion {
    #[must_use]
    pub fn is_none(&self) -> bool {
        !self.curiosity && self.emotions.is_empty() && self.label_only.is_empty()
    }

    /// Short label, e.g. `Curiosity + Emotion – exclusivity`
    #[must_use]
    pub fn label(&self) -> String {
        let emotions: Vec<&str> = self.emotions.iter().chain(&self.label_only).copied().collect();
        join_parts(self.curiosity, "Curiosity", "Emotion – ", &emotions)
            .unwrap_or_else(|| "None".to_string())
    }

    /// Longer explanation used for the reason column
    #[must_use]
    pub fn reason(&self) -> String {
        join_parts(
            self.curiosity,
            "Uses punctuation/symbols to provoke curiosity",
            "Emotion: ",
            &self.emotions,
        )
        .unwrap_or_else(|| "No emotional/curiosity triggers found".to_string())
    }
}

fn join_parts(
    curiosity: bool,
    curiosity_text: &str,
    emotion_prefix: &str,
    emotions: &[&str],
) -> Option<String> {
    let mut parts = Vec::new();
    if curiosity {
        parts.push(curiosity_text.to_string());
    }
    if !emotions.is_empty() {
        parts.push(format!("{emotion_prefix}{}", emotions.join(", ")));
    }
    (!parts.is_empty()).then(|| parts.join(" + "))
}

fn matched_emotions(lower: &str, keywords: &[(&str, &'static str)]) -> Vec<&'static str> {
    keywords
        .iter()
        .filter(|(word, _)| lower.contains(word))
        .map(|(_, description)| *description)
        .collect()
}

#[must_use]
pub fn detect_subject_emotion(subject: &str) -> SubjectEmotion {
    let lower = subject.to_lowercase();
    SubjectEmotion {
        curiosity: CURIOSITY_MARKERS.is_match(subject),
        emotions: matched_emotions(&lower, &EMOTION_KEYWORDS),
        label_only: matched_emotions(&lower, &LABEL_ONLY_KEYWORDS),
    }
}

// --- Hook style ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HookStyle {
    QuestionCuriosity,
    QuestionCta,
    QuestionGeneric,
    StatementOrList,
}

/// Which part of the message a hook was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HookSource {
    Subject,
    Body,
}

impl HookSource {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Body => "body",
        }
    }
}

impl HookStyle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QuestionCuriosity => "Question – Curiosity",
            Self::QuestionCta => "Question – CTA",
            Self::QuestionGeneric => "Question – Generic",
            Self::StatementOrList => "Statement or List",
        }
    }

    #[must_use]
    pub fn explanation(self, source: HookSource) -> String {
        match self {
            Self::QuestionCuriosity => "Uses 'wh' question to provoke curiosity".to_string(),
            Self::QuestionCta => "Direct question implying action".to_string(),
            Self::QuestionGeneric => format!("Generic question in {}", source.as_str()),
            Self::StatementOrList => format!("No question structure in {}", source.as_str()),
        }
    }
}

impl fmt::Display for HookStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Question patterns, tried in order once a `?` is present
static QUESTION_RULES: LazyLock<[(Regex, HookStyle); 2]> = LazyLock::new(|| {
    [
        (
            Regex::new(r"how|why|what|when|where").unwrap(),
            HookStyle::QuestionCuriosity,
        ),
        (
            Regex::new(r"do you|have you|can you").unwrap(),
            HookStyle::QuestionCta,
        ),
    ]
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookAssessment {
    pub style: HookStyle,
    pub explanation: String,
}

#[must_use]
pub fn detect_hook_style(text: &str, source: HookSource) -> HookAssessment {
    let style = if text.contains('?') {
        let lower = text.to_lowercase();
        QUESTION_RULES
            .iter()
            .find(|(pattern, _)| pattern.is_match(&lower))
            .map_or(HookStyle::QuestionGeneric, |(_, style)| *style)
    } else {
        HookStyle::StatementOrList
    };

    HookAssessment {
        style,
        explanation: style.explanation(source),
    }
}

// --- Call to action ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cta {
    SignUp,
    Login,
    Buy,
    Learn,
    /// No anchor matched any rule
    Unclear,
}

impl Cta {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SignUp => "Button – Sign Up",
            Self::Login => "Button – Login",
            Self::Buy => "Button – Buy",
            Self::Learn => "Button – Learn",
            Self::Unclear => "❌ No clear CTA",
        }
    }
}

impl fmt::Display for Cta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct CtaRule {
    cta: Cta,
    href: &'static [&'static str],
    text: &'static [&'static str],
}

// The buy rule looks for "buy" in the href but "shop" in the anchor text.
const CTA_RULES: [CtaRule; 4] = [
    CtaRule {
        cta: Cta::SignUp,
        href: &["sign", "register", "signup"],
        text: &["sign", "register", "signup"],
    },
    CtaRule {
        cta: Cta::Login,
        href: &["login"],
        text: &["login"],
    },
    CtaRule {
        cta: Cta::Buy,
        href: &["buy"],
        text: &["shop"],
    },
    CtaRule {
        cta: Cta::Learn,
        href: &["learn"],
        text: &["learn"],
    },
];

/// The first anchor, in document order, that matches any rule decides
#[must_use]
pub fn classify_cta(links: &[Link]) -> Cta {
    for link in links {
        let href = link.href.to_lowercase();
        let text = link.text.trim().to_lowercase();

        let matched = CTA_RULES.iter().find(|rule| {
            rule.href.iter().any(|kw| href.contains(kw)) || rule.text.iter().any(|kw| text.contains(kw))
        });
        if let Some(rule) = matched {
            return rule.cta;
        }
    }
    Cta::Unclear
}

// --- Hyperlinks ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HyperlinkSummary {
    /// Links whose href contains "http" or starts with "mailto:"
    pub valid_links: usize,
}

impl HyperlinkSummary {
    #[must_use]
    pub fn from_facts(facts: &HtmlFacts) -> Self {
        Self {
            valid_links: facts.valid_link_count(),
        }
    }
}

impl fmt::Display for HyperlinkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid_links > 0 {
            write!(f, "✅ {} links found", self.valid_links)
        } else {
            f.write_str("❌")
        }
    }
}
