use mail_metrics::*;

// --- EmailAddress ---

#[test]
fn test_parse_address_with_name() {
    let addr = EmailAddress::parse("John Doe <john@example.com>").unwrap();
    assert_eq!(addr.address, "john@example.com");
}

#[test]
fn test_parse_address_with_quoted_name() {
    let addr = EmailAddress::parse("\"Doe, John\" <john@example.com>").unwrap();
    assert_eq!(addr.address, "john@example.com");
}

#[test]
fn test_parse_address_angle_only() {
    let addr = EmailAddress::parse("<john@example.com>").unwrap();
    assert_eq!(addr.address, "john@example.com");
}

#[test]
fn test_parse_plain_address() {
    let addr = EmailAddress::parse("  jane@example.org ").unwrap();
    assert_eq!(addr.address, "jane@example.org");
}

#[test]
fn test_parse_invalid_address() {
    assert!(EmailAddress::parse("").is_none());
    assert!(EmailAddress::parse("not an address").is_none());
    assert!(EmailAddress::parse("Name <no-at-sign>").is_none());
}

#[test]
fn test_address_mailto_link() {
    let addr = EmailAddress::parse("Jane <jane@example.org>").unwrap();
    assert_eq!(
        addr.mailto_link(),
        "[jane@example.org](mailto:jane@example.org)"
    );
}

// --- Link ---

#[test]
fn test_link_validity() {
    let link = |href: &str| Link {
        href: href.to_string(),
        ..Link::default()
    };

    assert!(link("https://example.com").is_valid());
    assert!(link("http://example.com").is_valid());
    assert!(link("mailto:me@example.com").is_valid());
    assert!(link("/redirect?to=https%3A").is_valid());
    assert!(!link("/relative").is_valid());
    assert!(!link("tel:+15551234567").is_valid());
    assert!(!link("see mailto:me@example.com").is_valid());
}

// --- Metric ---

#[test]
fn test_metric_names() {
    assert_eq!(Metric::TimeSent.name(), "Time Sent");
    assert_eq!(Metric::Cta.to_string(), "CTA");
    assert_eq!(Metric::MessageId.name(), "Message ID");
    assert_eq!(Metric::BASE.len(), 15);
    assert!(!Metric::BASE.contains(&Metric::MessageId));
}

#[test]
fn test_metric_serializes_as_display_name() {
    for metric in Metric::BASE.into_iter().chain([Metric::MessageId]) {
        let json = serde_json::to_value(metric).unwrap();
        assert_eq!(json, metric.name());
        assert_eq!(serde_json::from_value::<Metric>(json).unwrap(), metric);
    }
}

// --- MetricTable ---

#[test]
fn test_metric_table_lookup() {
    let mut table = MetricTable::default();
    assert!(table.is_empty());

    table.push(Metric::Sender, "a");
    table.push(Metric::Tone, "Casual");

    assert_eq!(table.len(), 2);
    assert_eq!(table.get(Metric::Tone), Some("Casual"));
    assert_eq!(table.get(Metric::Category), None);
}

// --- ParsedMessage ---

#[test]
fn test_parsed_message_header_defaults() {
    let message = ParsedMessage {
        headers: vec![("From".into(), "a@example.com".into())],
        ..ParsedMessage::default()
    };

    assert_eq!(message.sender(), "a@example.com");
    assert_eq!(message.header("from"), "a@example.com");
    assert_eq!(message.subject(), "");
    assert_eq!(message.date(), "");
}
