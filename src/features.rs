//! Feature assembly: one raw message in, one metric table out

use crate::classify::{
    Cta, EmailType, HookAssessment, HookSource, HyperlinkSummary, SubjectEmotion, ToneAssessment,
    ValueCategory, classify_cta, classify_email_type, classify_tone, classify_value,
    detect_hook_style, detect_subject_emotion,
};
use crate::html::extract_facts;
use crate::parser::parse_message;
use crate::sentiment::{LexiconScorer, TextScorer};
use crate::types::{EmailAddress, Metric, MetricTable};
use chrono::{NaiveDateTime, Weekday};
use serde::Serialize;
use tracing::debug;

/// Sending cadence is not measured yet; every message reports this
pub const FREQUENCY_PLACEHOLDER: &str = "3 emails/week";

/// `Date` header layout after the `Day, ` prefix, within the first 25 characters
const RFC2822_DATE_TIME: &str = "%d %b %Y %H:%M:%S";
const ISO_UTC: &str = "%Y-%m-%dT%H:%M:%SZ";
const TIME_SENT_FORMAT: &str = "%I:%M %p, %A";

/// Everything computed for one message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailFeatures {
    /// Markdown mail link for the sender
    pub sender: String,
    pub frequency: &'static str,
    pub time_sent: String,
    pub hyperlinks: HyperlinkSummary,
    pub subject_emotion: SubjectEmotion,
    pub email_type: EmailType,
    pub cta: Cta,
    pub word_count: usize,
    pub tone: ToneAssessment,
    pub has_visuals: bool,
    pub subject_hook: HookAssessment,
    pub body_hook: HookAssessment,
    pub category: ValueCategory,

    /// Body polarity; kept for callers, not part of the table
    pub sentiment: f64,
}

impl EmailFeatures {
    /// Display value for a base metric; `None` for `Message ID`
    #[must_use]
    pub fn value(&self, metric: Metric) -> Option<String> {
        let value = match metric {
            Metric::Sender => self.sender.clone(),
            Metric::Frequency => self.frequency.to_string(),
            Metric::TimeSent => self.time_sent.clone(),
            Metric::ContainsHyperlinks => self.hyperlinks.to_string(),
            Metric::SubjectEmotion => self.subject_emotion.label(),
            Metric::SubjectEmotionReason => self.subject_emotion.reason(),
            Metric::Type => self.email_type.to_string(),
            Metric::Cta => self.cta.to_string(),
            Metric::Length => format!("{} words", self.word_count),
            Metric::Tone => self.tone.tone.to_string(),
            Metric::ToneReason => self.tone.reason().to_string(),
            Metric::ContainsVisuals => check_mark(self.has_visuals).to_string(),
            Metric::HookStyle => self.subject_hook.style.to_string(),
            Metric::HookExplanation => self.subject_hook.explanation.clone(),
            Metric::Category => self.category.to_string(),
            Metric::MessageId => return None,
        };
        Some(value)
    }

    /// The fixed 15-row table, always in [`Metric::BASE`] order
    #[must_use]
    pub fn to_metric_table(&self) -> MetricTable {
        let mut table = MetricTable::default();
        for metric in Metric::BASE {
            if let Some(value) = self.value(metric) {
                table.push(metric, value);
            }
        }
        table
    }
}

const fn check_mark(present: bool) -> &'static str {
    if present { "✅" } else { "❌" }
}

/// Extract features using the built-in lexicon scorer
#[must_use]
pub fn extract_features(raw: &str) -> EmailFeatures {
    extract_features_with(raw, &LexiconScorer)
}

#[must_use]
pub fn extract_features_with(raw: &str, scorer: &dyn TextScorer) -> EmailFeatures {
    let message = parse_message(raw);
    let facts = extract_facts(&message.body, message.is_html);
    let text = facts.plain_text.as_str();
    let subject = message.subject();

    let features = EmailFeatures {
        sender: render_sender(message.sender()),
        frequency: FREQUENCY_PLACEHOLDER,
        time_sent: format_time_sent(message.date()),
        hyperlinks: HyperlinkSummary::from_facts(&facts),
        subject_emotion: detect_subject_emotion(subject),
        email_type: classify_email_type(text),
        cta: classify_cta(&facts.links),
        word_count: facts.word_count(),
        tone: classify_tone(text),
        has_visuals: facts.has_image,
        subject_hook: detect_hook_style(subject, HookSource::Subject),
        body_hook: detect_hook_style(text, HookSource::Body),
        category: classify_value(text),
        sentiment: scorer.polarity(text),
    };

    debug!(
        subject,
        email_type = %features.email_type,
        cta = %features.cta,
        words = features.word_count,
        sentiment = features.sentiment,
        "Extracted features"
    );
    features
}

/// Render the sender as `[address](mailto:address)`.
///
/// Uses the bare address when the header parses, the raw header otherwise.
#[must_use]
pub fn render_sender(from: &str) -> String {
    EmailAddress::parse(from).map_or_else(
        || format!("[{from}](mailto:{from})"),
        |address| address.mailto_link(),
    )
}

/// Format a `Date` header as `10:30 AM, Monday`, or `Unknown`.
///
/// The weekday in the header is only checked to be a day name; the printed
/// weekday always comes from the date itself.
#[must_use]
pub fn format_time_sent(date: &str) -> String {
    let prefix: String = date.chars().take(25).collect();

    // Trailing whitespace is trimmed on purpose so single-digit days parse
    parse_rfc2822_prefix(prefix.trim_end())
        .or_else(|| NaiveDateTime::parse_from_str(date, ISO_UTC).ok())
        .map_or_else(
            || "Unknown".to_string(),
            |sent| sent.format(TIME_SENT_FORMAT).to_string(),
        )
}

fn parse_rfc2822_prefix(prefix: &str) -> Option<NaiveDateTime> {
    let (day, rest) = prefix.split_once(", ")?;
    if day.len() != 3 || day.parse::<Weekday>().is_err() {
        return None;
    }
    NaiveDateTime::parse_from_str(rest, RFC2822_DATE_TIME).ok()
}
