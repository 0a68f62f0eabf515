use chrono::{Duration, Utc};
use mail_metrics::{AppConfig, Credentials, Error};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_config_defaults() {
    let config = config_from(&[]);

    assert_eq!(config.api_url, "https://gmail.googleapis.com");
    assert_eq!(config.credentials_path, PathBuf::from("credentials.json"));
    assert_eq!(config.access_token, None);
    assert_eq!(config.num_emails, 3);
}

#[test]
fn test_config_overrides() {
    let config = config_from(&[
        ("MAIL_METRICS_API_URL", "http://localhost:9000"),
        ("MAIL_METRICS_CREDENTIALS", "/tmp/creds.json"),
        ("MAIL_METRICS_ACCESS_TOKEN", "abc"),
        ("MAIL_METRICS_NUM_EMAILS", "10"),
    ]);

    assert_eq!(config.api_url, "http://localhost:9000");
    assert_eq!(config.credentials_path, PathBuf::from("/tmp/creds.json"));
    assert_eq!(config.access_token.as_deref(), Some("abc"));
    assert_eq!(config.num_emails, 10);
}

#[test]
fn test_config_invalid_count_falls_back() {
    let config = config_from(&[
        ("MAIL_METRICS_NUM_EMAILS", "lots"),
        ("MAIL_METRICS_ACCESS_TOKEN", "  "),
    ]);

    assert_eq!(config.num_emails, 3);
    assert_eq!(config.access_token, None);
}

#[test]
fn test_configured_token_skips_credentials_file() {
    let config = config_from(&[
        ("MAIL_METRICS_ACCESS_TOKEN", "direct"),
        ("MAIL_METRICS_CREDENTIALS", "/does/not/exist.json"),
    ]);

    assert_eq!(config.resolve_access_token().unwrap(), "direct");
}

#[test]
fn test_missing_credentials_file() {
    let config = config_from(&[("MAIL_METRICS_CREDENTIALS", "/does/not/exist.json")]);

    assert!(matches!(
        config.resolve_access_token(),
        Err(Error::Credentials(_))
    ));
}

#[test]
fn test_load_credentials_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"token": "ya29.stored", "refresh_token": "1//r", "client_id": "id",
            "client_secret": "secret", "token_uri": "https://oauth2.googleapis.com/token",
            "scopes": ["https://www.googleapis.com/auth/gmail.readonly"],
            "expiry": "2099-01-01T00:00:00Z"}}"#
    )
    .unwrap();

    let credentials = Credentials::load(file.path()).unwrap();

    assert_eq!(credentials.token.as_deref(), Some("ya29.stored"));
    assert_eq!(credentials.client_id.as_deref(), Some("id"));
    assert_eq!(credentials.access_token(Utc::now()).unwrap(), "ya29.stored");
}

#[test]
fn test_expired_token_is_not_valid() {
    let now = Utc::now();
    let credentials = Credentials {
        token: Some("old".into()),
        expiry: Some(now - Duration::minutes(5)),
        ..Credentials::default()
    };

    assert_eq!(credentials.valid_token(now), None);
    assert!(matches!(
        credentials.access_token(now),
        Err(Error::Credentials(_))
    ));
}

#[test]
fn test_token_without_expiry_is_valid() {
    let credentials = Credentials {
        token: Some("forever".into()),
        ..Credentials::default()
    };

    assert_eq!(credentials.valid_token(Utc::now()), Some("forever"));
}

#[test]
fn test_expired_token_is_refreshed() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/token")
        .match_body(mockito::Matcher::AllOf(vec![
            mockito::Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            mockito::Matcher::UrlEncoded("refresh_token".into(), "1//r".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "ya29.fresh", "expires_in": 3599, "token_type": "Bearer"}"#)
        .create();

    let credentials = Credentials {
        token: None,
        refresh_token: Some("1//r".into()),
        client_id: Some("id".into()),
        client_secret: Some("secret".into()),
        token_uri: Some(format!("{}/token", server.url())),
        expiry: None,
    };

    assert_eq!(credentials.access_token(Utc::now()).unwrap(), "ya29.fresh");
    mock.assert();
}

#[test]
fn test_invalid_credentials_json() {
    assert!(matches!(
        Credentials::parse("not json"),
        Err(Error::Credentials(_))
    ));
}
