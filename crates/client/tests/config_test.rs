use std::collections::HashMap;
use std::path::PathBuf;

use chrono::FixedOffset;
use pretty_assertions::assert_eq;
use rstest::rstest;
use tracing::Level;

use iut_erp_client::config::{ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_SESSION_FILE};

fn config_from(vars: &[(&str, &str)]) -> eyre::Result<ClientConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    ClientConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.timezone, FixedOffset::east_opt(3600).unwrap());
    assert_eq!(config.credentials(), None);
}

#[rstest]
#[case("+00:00", 0)]
#[case("+01:00", 3600)]
#[case(" -05:30 ", -19800)]
fn test_timezone_offset(#[case] raw: &str, #[case] seconds: i32) {
    let config = config_from(&[("ERP_TIMEZONE_OFFSET", raw)]).unwrap();

    assert_eq!(config.timezone.local_minus_utc(), seconds);
}

#[test]
fn test_invalid_timezone_offset_is_rejected() {
    let err = config_from(&[("ERP_TIMEZONE_OFFSET", "Africa/Douala")]).unwrap_err();

    assert!(err.to_string().contains("ERP_TIMEZONE_OFFSET"));
}

#[test]
fn test_base_url_is_trimmed() {
    let config = config_from(&[("ERP_API_BASE_URL", " https://erp.iutdouala.cm/api/ ")]).unwrap();

    assert_eq!(config.api_base_url, "https://erp.iutdouala.cm/api");
}

#[test]
fn test_invalid_timeout_is_rejected() {
    let err = config_from(&[("ERP_REQUEST_TIMEOUT_SECONDS", "soon")]).unwrap_err();

    assert!(err.to_string().contains("ERP_REQUEST_TIMEOUT_SECONDS"));
}

#[test]
fn test_credentials_need_both_halves() {
    let only_email = config_from(&[("ERP_EMAIL", "admin@iutdouala.cm")]).unwrap();
    assert_eq!(only_email.credentials(), None);

    let empty_password =
        config_from(&[("ERP_EMAIL", "admin@iutdouala.cm"), ("ERP_PASSWORD", "")]).unwrap();
    assert_eq!(empty_password.credentials(), None);

    let both = config_from(&[("ERP_EMAIL", "admin@iutdouala.cm"), ("ERP_PASSWORD", "secret")])
        .unwrap();
    assert_eq!(both.credentials(), Some(("admin@iutdouala.cm", "secret")));
}

#[rstest]
#[case("trace", Level::TRACE)]
#[case("debug", Level::DEBUG)]
#[case("warn", Level::WARN)]
#[case("error", Level::ERROR)]
#[case("verbose", Level::INFO)]
fn test_log_level(#[case] raw: &str, #[case] expected: Level) {
    let config = config_from(&[("LOG_LEVEL", raw)]).unwrap();

    assert_eq!(config.log_level, expected);
}
