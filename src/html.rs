//! Body normalization: markup stripping and HTML structure signals

use crate::types::{HtmlFacts, Link};
use scraper::{Html, Node, Selector};
use tracing::debug;

/// Derive plain text, anchors and the image flag from a body.
///
/// Plain text bodies pass through with whitespace collapsed and carry no
/// links or images.
#[must_use]
pub fn extract_facts(body: &str, is_html: bool) -> HtmlFacts {
    if !is_html {
        return HtmlFacts {
            plain_text: normalize_whitespace(body),
            ..HtmlFacts::default()
        };
    }

    let document = Html::parse_document(body);
    let facts = HtmlFacts {
        plain_text: visible_text(&document),
        links: anchors(&document),
        has_image: has_image(&document),
    };

    debug!(
        links = facts.links.len(),
        has_image = facts.has_image,
        words = facts.word_count(),
        "Extracted HTML facts"
    );
    facts
}

/// Collapse every run of whitespace into a single space
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn visible_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "script" | "style"))
        });
        if !hidden {
            text.push_str(chunk);
            text.push(' ');
        }
    }

    normalize_whitespace(&text)
}

fn anchors(document: &Html) -> Vec<Link> {
    let selector = Selector::parse("a[href]").expect("Invalid selector");

    document
        .select(&selector)
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            Some(Link {
                href: href.to_string(),
                text: a.text().collect::<String>().trim().to_string(),
                classes: a.value().classes().map(str::to_string).collect(),
            })
        })
        .collect()
}

fn has_image(document: &Html) -> bool {
    let selector = Selector::parse("img").expect("Invalid selector");
    document.select(&selector).next().is_some()
}
