use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_path(tag: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("category_admin_{tag}_{suffix}.toml"))
}

#[test]
fn defaults_point_at_public_api() {
    let settings = ClientSettings::default();
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn settings_file_overrides_defaults() {
    let path = temp_settings_path("file");
    fs::write(
        &path,
        "api_base_url = \"http://localhost:3000/api/v1\"\nrequest_timeout_secs = 15\n",
    )
    .expect("write settings");

    let settings = load_settings_file(&path, ClientSettings::default());
    assert_eq!(settings.api_base_url, "http://localhost:3000/api/v1");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(15)));

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn missing_or_malformed_settings_file_keeps_defaults() {
    let missing = temp_settings_path("missing");
    assert_eq!(
        load_settings_file(&missing, ClientSettings::default()),
        ClientSettings::default()
    );

    let malformed = temp_settings_path("malformed");
    fs::write(&malformed, "api_base_url = [").expect("write settings");
    assert_eq!(
        load_settings_file(&malformed, ClientSettings::default()),
        ClientSettings::default()
    );
    fs::remove_file(malformed).expect("cleanup");
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("CATEGORY_API_BASE_URL", "http://plain.example/api"),
        ("APP__API_BASE_URL", "http://prefixed.example/api"),
        ("APP__REQUEST_TIMEOUT_SECS", "30"),
    ]);

    let settings = apply_env_overrides(ClientSettings::default(), |key| {
        env.get(key).map(|v| v.to_string())
    });
    assert_eq!(settings.api_base_url, "http://prefixed.example/api");
    assert_eq!(settings.request_timeout_secs, 30);
}

#[test]
fn non_numeric_timeout_env_is_ignored() {
    let settings = apply_env_overrides(ClientSettings::default(), |key| {
        (key == "APP__REQUEST_TIMEOUT_SECS").then(|| "soon".to_string())
    });
    assert_eq!(settings.request_timeout_secs, 0);
}

#[test]
fn cli_override_replaces_base_url_only_when_present() {
    let settings = ClientSettings::default().with_base_url_override(None);
    assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);

    let settings = settings.with_base_url_override(Some("http://127.0.0.1:9000".into()));
    assert_eq!(settings.api_base_url, "http://127.0.0.1:9000");
}

#[test]
fn normalizes_trailing_slashes() {
    assert_eq!(
        normalize_base_url("https://api.escuelajs.co/api/v1/").expect("valid"),
        "https://api.escuelajs.co/api/v1"
    );
    assert_eq!(
        normalize_base_url(" http://127.0.0.1:8080 ").expect("valid"),
        "http://127.0.0.1:8080"
    );
}

#[test]
fn rejects_unusable_base_urls() {
    assert!(matches!(
        normalize_base_url("not a url"),
        Err(CategoryApiError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        normalize_base_url("ftp://files.example/api"),
        Err(CategoryApiError::InvalidBaseUrl { .. })
    ));
    assert!(matches!(
        normalize_base_url("http://example.com/api?page=2"),
        Err(CategoryApiError::InvalidBaseUrl { .. })
    ));
}
