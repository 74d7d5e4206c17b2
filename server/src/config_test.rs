use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn from_lookup_applies_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[("CRM_API_URL", "https://crm.example.test/api/")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.crm_api_url, "https://crm.example.test/api");
    assert_eq!(cfg.crm_upload_url, "https://crm.example.test/api/upload-file");
    assert_eq!(cfg.relay_timeout_secs, DEFAULT_RELAY_TIMEOUT_SECS);
    assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    assert_eq!(cfg.graphql_url(), "https://crm.example.test/api/graphql");
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("CRM_API_URL", "http://localhost:3300"),
        ("CRM_UPLOAD_URL", "http://files.local/upload"),
        ("PORT", "8080"),
        ("RELAY_TIMEOUT_SECS", " 5 "),
        ("MAX_UPLOAD_BYTES", "1024"),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.crm_upload_url, "http://files.local/upload");
    assert_eq!(cfg.relay_timeout_secs, 5);
    assert_eq!(cfg.max_upload_bytes, 1024);
}

#[test]
fn from_lookup_requires_api_url() {
    assert_eq!(ServerConfig::from_lookup(lookup(&[])), Err(ConfigError::Missing("CRM_API_URL")));
    assert_eq!(
        ServerConfig::from_lookup(lookup(&[("CRM_API_URL", "  ")])),
        Err(ConfigError::Missing("CRM_API_URL"))
    );
    assert_eq!(
        ServerConfig::from_lookup(lookup(&[("CRM_API_URL", "/")])),
        Err(ConfigError::Missing("CRM_API_URL"))
    );
}

#[test]
fn from_lookup_rejects_unparseable_numbers() {
    let err = ServerConfig::from_lookup(lookup(&[("CRM_API_URL", "http://x"), ("PORT", "eighty")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "eighty".into() });
    assert_eq!(err.to_string(), "invalid value for PORT: \"eighty\"");
}
