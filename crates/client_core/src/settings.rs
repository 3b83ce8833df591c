use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::{bail, Context};
use url::Url;

pub const SETTINGS_FILE: &str = "advisor.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub request_timeout_secs: u64,
    pub show_local_names: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000/api/recommend".into(),
            request_timeout_secs: 30,
            show_local_names: true,
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn endpoint_url(&self) -> anyhow::Result<Url> {
        parse_endpoint(&self.endpoint)
    }
}

/// Defaults, then `advisor.toml` in the working directory, then env vars.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    apply_file(&mut settings, Path::new(SETTINGS_FILE));
    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
        Ok(file_cfg) => apply_pairs(settings, |key| {
            file_cfg.get(key).map(|value| match value {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
        }),
        Err(err) => tracing::warn!("ignoring unreadable {}: {err}", path.display()),
    }
}

fn apply_pairs(settings: &mut Settings, get: impl Fn(&str) -> Option<String>) {
    if let Some(v) = get("endpoint") {
        settings.endpoint = v;
    }
    if let Some(v) = get("request_timeout_secs").and_then(|v| v.trim().parse().ok()) {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = get("show_local_names").and_then(|v| parse_flag(&v)) {
        settings.show_local_names = v;
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("ADVISOR_ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = var("APP__ENDPOINT") {
        settings.endpoint = v;
    }

    if let Some(v) = var("APP__REQUEST_TIMEOUT_SECS").and_then(|v| v.trim().parse().ok()) {
        settings.request_timeout_secs = v;
    }

    if let Some(v) = var("APP__SHOW_LOCAL_NAMES").and_then(|v| parse_flag(&v)) {
        settings.show_local_names = v;
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_endpoint(raw: &str) -> anyhow::Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("invalid recommendation endpoint '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("recommendation endpoint must start with http:// or https://, got '{raw}'");
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
