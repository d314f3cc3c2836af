use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::error::CategoryApiError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.escuelajs.co/api/v1";
pub const SETTINGS_FILE_NAME: &str = "category_admin.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    /// Zero leaves the HTTP client's own default in place.
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_secs: 0,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn with_base_url_override(mut self, api_base_url: Option<String>) -> Self {
        if let Some(v) = api_base_url {
            self.api_base_url = v;
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `category_admin.toml` in the working directory, then env.
pub fn load_settings() -> ClientSettings {
    let settings = load_settings_file(Path::new(SETTINGS_FILE_NAME), ClientSettings::default());
    apply_env_overrides(settings, |key| std::env::var(key).ok())
}

pub fn load_settings_file(path: &Path, mut settings: ClientSettings) -> ClientSettings {
    let Ok(raw) = fs::read_to_string(path) else {
        return settings;
    };

    match toml::from_str::<SettingsFile>(&raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.api_base_url {
                settings.api_base_url = v;
            }
            if let Some(v) = file_cfg.request_timeout_secs {
                settings.request_timeout_secs = v;
            }
        }
        Err(err) => {
            warn!("ignoring malformed settings file '{}': {err}", path.display());
        }
    }

    settings
}

pub fn apply_env_overrides(
    mut settings: ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    if let Some(v) = lookup("CATEGORY_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = parsed,
            Err(_) => warn!("ignoring non-numeric APP__REQUEST_TIMEOUT_SECS value '{v}'"),
        }
    }

    settings
}

/// Validates an http(s) base url and strips trailing slashes so endpoint
/// paths can be appended verbatim.
pub fn normalize_base_url(raw: &str) -> Result<String, CategoryApiError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|err| CategoryApiError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: err.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CategoryApiError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(CategoryApiError::InvalidBaseUrl {
            url: trimmed.to_string(),
            reason: "query strings and fragments are not allowed".to_string(),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
