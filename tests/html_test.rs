use mail_metrics::html::{extract_facts, normalize_whitespace};

#[test]
fn test_strip_markup() {
    let html = "<html><body><h1>Hello</h1><p>World</p></body></html>";

    let facts = extract_facts(html, true);

    assert_eq!(facts.plain_text, "Hello World");
    assert!(!facts.plain_text.contains('<'));
}

#[test]
fn test_script_and_style_are_hidden() {
    let html = "<html><head><style>p { color: red; }</style></head>\
                <body><script>var x = 1;</script><p>Visible</p></body></html>";

    let facts = extract_facts(html, true);

    assert_eq!(facts.plain_text, "Visible");
}

#[test]
fn test_entities_are_decoded() {
    let facts = extract_facts("<p>Fish &amp; chips&nbsp;today</p>", true);

    assert!(facts.plain_text.contains("Fish & chips"));
}

#[test]
fn test_links_in_document_order() {
    let html = r#"<p>
        <a href="https://example.com/one" class="btn primary">One</a>
        <a name="anchor-without-href">skip</a>
        <a href="/relative">  Two  </a>
        <a href="mailto:me@example.com">Mail</a>
    </p>"#;

    let facts = extract_facts(html, true);

    assert_eq!(facts.links.len(), 3);
    assert_eq!(facts.links[0].href, "https://example.com/one");
    assert_eq!(facts.links[0].classes.len(), 2);
    assert!(facts.links[0].classes.iter().any(|c| c == "primary"));
    assert_eq!(facts.links[1].text, "Two");
    assert_eq!(facts.links[2].href, "mailto:me@example.com");
}

#[test]
fn test_valid_link_count() {
    let html = r##"<a href="https://a.example">a</a>
                  <a href="http://b.example">b</a>
                  <a href="mailto:c@example.com">c</a>
                  <a href="/signup">d</a>
                  <a href="#top">e</a>"##;

    let facts = extract_facts(html, true);

    assert_eq!(facts.links.len(), 5);
    assert_eq!(facts.valid_link_count(), 3);
}

#[test]
fn test_image_detection() {
    assert!(extract_facts(r#"<p><img src="cid:logo"></p>"#, true).has_image);
    assert!(!extract_facts("<p>No pictures</p>", true).has_image);
}

#[test]
fn test_plain_text_passthrough() {
    let facts = extract_facts("Hello   there\r\n\tfriend <not a tag>", false);

    assert_eq!(facts.plain_text, "Hello there friend <not a tag>");
    assert!(facts.links.is_empty());
    assert!(!facts.has_image);
}

#[test]
fn test_empty_body() {
    let plain = extract_facts("", false);
    let html = extract_facts("", true);

    assert_eq!(plain.plain_text, "");
    assert_eq!(html.plain_text, "");
    assert_eq!(html.word_count(), 0);
    assert!(html.links.is_empty());
}

#[test]
fn test_normalize_whitespace() {
    assert_eq!(normalize_whitespace("  a \n\n b\tc "), "a b c");
    assert_eq!(normalize_whitespace(" \n "), "");
}
