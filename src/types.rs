//! Core types shared by the extraction pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// A message split into headers and the body chosen for analysis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// Headers in original order, with decoded values
    pub headers: Vec<(String, String)>,

    /// Chosen body part, decoded to text
    pub body: String,

    /// Whether `body` came from a `text/html` part
    pub is_html: bool,
}

impl ParsedMessage {
    /// Look up a header by case-insensitive name, defaulting to `""`
    #[must_use]
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map_or("", |(_, value)| value.as_str())
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        self.header("Subject")
    }

    #[must_use]
    pub fn sender(&self) -> &str {
        self.header("From")
    }

    #[must_use]
    pub fn date(&self) -> &str {
        self.header("Date")
    }
}

/// Email address pulled out of a `From` header
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    /// Bare address (e.g., "john@example.com")
    pub address: String,
}

impl EmailAddress {
    /// Parse `Name <user@domain>` or a bare `user@domain`
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some(start) = s.find('<')
            && let Some(end) = s[start..].find('>').map(|rel| start + rel)
        {
            let address = s[start + 1..end].trim();

            if address.contains('@') {
                return Some(Self {
                    address: address.to_string(),
                });
            }
        }

        if s.contains('@') && !s.contains(char::is_whitespace) {
            return Some(Self {
                address: s.to_string(),
            });
        }

        None
    }

    /// Render as a markdown mail link
    #[must_use]
    pub fn mailto_link(&self) -> String {
        format!("[{0}](mailto:{0})", self.address)
    }
}

/// An anchor element that carries an `href`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,

    /// Visible text, trimmed
    pub text: String,

    /// CSS classes on the anchor
    pub classes: Vec<String>,
}

impl Link {
    /// Counts toward "Contains Hyperlinks"
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.href.contains("http") || self.href.starts_with("mailto:")
    }
}

/// Plain text and structural signals derived from a body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlFacts {
    /// Markup-free text, tokens separated by single spaces
    pub plain_text: String,

    /// All anchors with an `href`, in document order
    pub links: Vec<Link>,

    /// At least one `<img>` present
    pub has_image: bool,
}

impl HtmlFacts {
    #[must_use]
    pub fn valid_link_count(&self) -> usize {
        self.links.iter().filter(|link| link.is_valid()).count()
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.plain_text.split_whitespace().count()
    }
}

/// Name of one row in a metric table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Sender,
    Frequency,
    #[serde(rename = "Time Sent")]
    TimeSent,
    #[serde(rename = "Contains Hyperlinks")]
    ContainsHyperlinks,
    #[serde(rename = "Subject Emotion")]
    SubjectEmotion,
    #[serde(rename = "Subject Emotion Reason")]
    SubjectEmotionReason,
    Type,
    #[serde(rename = "CTA")]
    Cta,
    Length,
    Tone,
    #[serde(rename = "Tone Reason")]
    ToneReason,
    #[serde(rename = "Contains Visuals")]
    ContainsVisuals,
    #[serde(rename = "Hook Style")]
    HookStyle,
    #[serde(rename = "Hook Explanation")]
    HookExplanation,
    Category,
    #[serde(rename = "Message ID")]
    MessageId,
}

impl Metric {
    /// Rows produced for every message, in table order
    pub const BASE: [Self; 15] = [
        Self::Sender,
        Self::Frequency,
        Self::TimeSent,
        Self::ContainsHyperlinks,
        Self::SubjectEmotion,
        Self::SubjectEmotionReason,
        Self::Type,
        Self::Cta,
        Self::Length,
        Self::Tone,
        Self::ToneReason,
        Self::ContainsVisuals,
        Self::HookStyle,
        Self::HookExplanation,
        Self::Category,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sender => "Sender",
            Self::Frequency => "Frequency",
            Self::TimeSent => "Time Sent",
            Self::ContainsHyperlinks => "Contains Hyperlinks",
            Self::SubjectEmotion => "Subject Emotion",
            Self::SubjectEmotionReason => "Subject Emotion Reason",
            Self::Type => "Type",
            Self::Cta => "CTA",
            Self::Length => "Length",
            Self::Tone => "Tone",
            Self::ToneReason => "Tone Reason",
            Self::ContainsVisuals => "Contains Visuals",
            Self::HookStyle => "Hook Style",
            Self::HookExplanation => "Hook Explanation",
            Self::Category => "Category",
            Self::MessageId => "Message ID",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a metric table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow {
    pub metric: Metric,
    pub value: String,
}

/// Ordered metrics for a single message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricTable {
    pub rows: Vec<MetricRow>,
}

impl MetricTable {
    pub fn push(&mut self, metric: Metric, value: impl Into<String>) {
        self.rows.push(MetricRow {
            metric,
            value: value.into(),
        });
    }

    /// Append the trailing "Message ID" row
    #[must_use]
    pub fn with_message_id(mut self, id: impl Into<String>) -> Self {
        self.push(Metric::MessageId, id);
        self
    }

    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.metric == metric)
            .map(|row| row.value.as_str())
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.rows.iter().map(|row| row.metric)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Metric tables for every processed message of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub tables: Vec<MetricTable>,
}

impl ResultSet {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.tables.len()
    }

    /// All rows stacked, as one long two-column table
    pub fn rows(&self) -> impl Iterator<Item = &MetricRow> {
        self.tables.iter().flat_map(|table| table.rows.iter())
    }
}

impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Empty result set");
        }

        let total = self.rows().count();
        let index_width = (total.saturating_sub(1)).to_string().len();
        let metric_width = self
            .rows()
            .map(|row| row.metric.name().chars().count())
            .max()
            .unwrap_or(0)
            .max("Metric".len());

        writeln!(
            f,
            "{:index_width$}  {:metric_width$}  Value",
            "", "Metric"
        )?;
        for (index, row) in self.rows().enumerate() {
            writeln!(
                f,
                "{index:<index_width$}  {:metric_width$}  {}",
                row.metric.name(),
                row.value
            )?;
        }
        Ok(())
    }
}
