use std::{collections::HashMap, path::PathBuf, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::Provider;

const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind_addr: String,
    pub static_dir: Option<PathBuf>,
    pub default_provider: Provider,
    pub upstream_timeout_secs: u64,
    pub klaviyo_private_key: Option<String>,
    pub klaviyo_list_id: Option<String>,
    pub klaviyo_api_base: String,
    pub klaviyo_revision: String,
    pub mailerlite_api_key: Option<String>,
    pub mailerlite_group_id: Option<String>,
    pub mailerlite_api_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8888".into(),
            static_dir: None,
            default_provider: Provider::Klaviyo,
            upstream_timeout_secs: 10,
            klaviyo_private_key: None,
            klaviyo_list_id: None,
            klaviyo_api_base: "https://a.klaviyo.com".into(),
            klaviyo_revision: "2024-10-15".into(),
            mailerlite_api_key: None,
            mailerlite_group_id: None,
            mailerlite_api_base: "https://connect.mailerlite.com".into(),
        }
    }
}

impl Settings {
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

/// Settings from `server.toml` (optional) and the process environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let env: HashMap<String, String> = std::env::vars().collect();
    settings_from_sources(config::File::with_name("server").required(false), &env)
}

/// Layering, lowest first: defaults, `file`, `APP__*` variables, then the
/// providers' conventional variable names for anything `APP__*` left unset.
pub(crate) fn settings_from_sources<S>(
    file: S,
    env: &HashMap<String, String>,
) -> anyhow::Result<Settings>
where
    S: config::Source + Send + Sync + 'static,
{
    let mut settings: Settings = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .source(Some(env.clone().into_iter().collect())),
        )
        .build()
        .context("failed to read server settings")?
        .try_deserialize()
        .context("invalid server settings")?;

    if let Some(v) = conventional(env, "SERVER_BIND", "BIND_ADDR") {
        settings.bind_addr = v;
    }
    if let Some(v) = conventional(env, "KLAVIYO_PRIVATE_KEY", "KLAVIYO_PRIVATE_KEY") {
        settings.klaviyo_private_key = Some(v);
    }
    if let Some(v) = conventional(env, "KLAVIYO_LIST_ID", "KLAVIYO_LIST_ID") {
        settings.klaviyo_list_id = Some(v);
    }
    if let Some(v) = conventional(env, "MAILERLITE_API_KEY", "MAILERLITE_API_KEY") {
        settings.mailerlite_api_key = Some(v);
    }
    if let Some(v) = conventional(env, "MAILERLITE_GROUP_ID", "MAILERLITE_GROUP_ID") {
        settings.mailerlite_group_id = Some(v);
    }

    Ok(settings)
}

/// `name`'s value unless the prefixed `APP__{app_key}` form is also set.
fn conventional(env: &HashMap<String, String>, name: &str, app_key: &str) -> Option<String> {
    let prefixed = format!("{ENV_PREFIX}{ENV_SEPARATOR}{app_key}");
    if env.contains_key(&prefixed) {
        return None;
    }
    env.get(name).cloned()
}

/// Trimmed, non-empty credential value.
pub fn credential(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
