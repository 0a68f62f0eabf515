//! MIME parsing and body selection

use crate::types::ParsedMessage;
use mailparse::{MailHeaderMap, ParsedMail};
use tracing::{debug, warn};

/// Parse a raw message into headers and the body used for analysis.
///
/// Never fails: a message `mailparse` cannot make sense of degrades to an
/// empty [`ParsedMessage`].
#[must_use]
pub fn parse_message(raw: &str) -> ParsedMessage {
    let parsed = match mailparse::parse_mail(raw.as_bytes()) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Unparseable message structure, using empty body: {e}");
            return ParsedMessage::default();
        }
    };

    let headers = parsed
        .headers
        .iter()
        .map(|h| (h.get_key(), h.get_value()))
        .collect();

    let (body, is_html) = if parsed.subparts.is_empty() {
        let is_html = parsed.ctype.mimetype.eq_ignore_ascii_case("text/html");
        (decode_body(&parsed), is_html)
    } else {
        select_body(&parsed)
    };

    let subject = parsed.headers.get_first_value("Subject").unwrap_or_default();
    debug!(
        %subject,
        is_html,
        body_len = body.len(),
        "Parsed message"
    );

    ParsedMessage {
        headers,
        body,
        is_html,
    }
}

/// Progress of the multipart walk
#[derive(Debug, Clone, PartialEq, Eq)]
enum BodyScan {
    /// Nothing usable seen yet
    Seeking,
    /// Holding the first html part while still looking for plain text
    HtmlFallback(String),
    /// A plain text part was found
    Done(String),
}

impl BodyScan {
    fn visit(self, part: &ParsedMail) -> Self {
        let mimetype = part.ctype.mimetype.to_lowercase();
        match self {
            Self::Done(_) => self,
            _ if mimetype == "text/plain" => Self::Done(decode_body(part)),
            Self::Seeking if mimetype == "text/html" => Self::HtmlFallback(decode_body(part)),
            scan => scan,
        }
    }

    const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    fn finish(self) -> (String, bool) {
        match self {
            Self::Seeking => (String::new(), false),
            Self::HtmlFallback(html) => (html, true),
            Self::Done(text) => (text, false),
        }
    }
}

/// First `text/plain` part wins, otherwise the first `text/html` part
fn select_body(parsed: &ParsedMail) -> (String, bool) {
    let mut scan = BodyScan::Seeking;
    for part in walk(parsed) {
        scan = scan.visit(part);
        if scan.is_done() {
            break;
        }
    }
    scan.finish()
}

/// Depth-first, pre-order list of every part including the root
fn walk<'a>(parsed: &'a ParsedMail<'a>) -> Vec<&'a ParsedMail<'a>> {
    let mut parts = vec![parsed];
    for sub in &parsed.subparts {
        parts.extend(walk(sub));
    }
    parts
}

/// Undo the transfer encoding and decode leniently.
///
/// UTF-8 and ASCII payloads drop undecodable sequences instead of
/// substituting replacement characters. Other charsets go through
/// `mailparse`'s charset tables and fall back to the same lossy path.
fn decode_body(part: &ParsedMail) -> String {
    let charset = part.ctype.charset.to_lowercase();
    let is_utf8 = matches!(charset.as_str(), "" | "utf-8" | "utf8" | "us-ascii" | "ascii");

    if !is_utf8 && let Ok(body) = part.get_body() {
        return body;
    }

    match part.get_body_raw() {
        Ok(bytes) => lossy_utf8(&bytes),
        Err(e) => {
            warn!("Could not decode body part: {e}");
            String::new()
        }
    }
}

/// Decode UTF-8, dropping invalid byte sequences
#[must_use]
pub fn lossy_utf8(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect()
}
