use super::{credential, settings_from_sources, Settings};

use std::collections::HashMap;

use config::{File, FileFormat};
use shared::domain::Provider;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn no_file() -> File<config::FileSourceString, FileFormat> {
    File::from_str("", FileFormat::Toml)
}

#[test]
fn defaults_apply_without_any_source() {
    let settings = settings_from_sources(no_file(), &env(&[])).expect("settings");
    let defaults = Settings::default();
    assert_eq!(settings.bind_addr, defaults.bind_addr);
    assert_eq!(settings.default_provider, Provider::Klaviyo);
    assert_eq!(settings.klaviyo_revision, "2024-10-15");
    assert_eq!(settings.klaviyo_private_key, None);
    assert_eq!(settings.upstream_timeout_secs, 10);
}

#[test]
fn file_values_override_defaults() {
    let file = File::from_str(
        r#"
            bind_addr = "0.0.0.0:9000"
            default_provider = "mailerlite"
            static_dir = "./public"
            mailerlite_group_id = "123"
        "#,
        FileFormat::Toml,
    );
    let settings = settings_from_sources(file, &env(&[])).expect("settings");
    assert_eq!(settings.bind_addr, "0.0.0.0:9000");
    assert_eq!(settings.default_provider, Provider::Mailerlite);
    assert_eq!(settings.static_dir.as_deref(), Some(std::path::Path::new("./public")));
    assert_eq!(settings.mailerlite_group_id.as_deref(), Some("123"));
}

#[test]
fn prefixed_environment_overrides_file() {
    let file = File::from_str(r#"bind_addr = "0.0.0.0:9000""#, FileFormat::Toml);
    let settings = settings_from_sources(
        file,
        &env(&[
            ("APP__BIND_ADDR", "127.0.0.1:7000"),
            ("APP__UPSTREAM_TIMEOUT_SECS", "3"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.bind_addr, "127.0.0.1:7000");
    assert_eq!(settings.upstream_timeout_secs, 3);
}

#[test]
fn provider_variables_fill_credentials() {
    let settings = settings_from_sources(
        no_file(),
        &env(&[
            ("KLAVIYO_PRIVATE_KEY", "pk_live"),
            ("KLAVIYO_LIST_ID", "UcNgUr"),
            ("MAILERLITE_API_KEY", "ml_key"),
            ("MAILERLITE_GROUP_ID", "42"),
            ("SERVER_BIND", "0.0.0.0:8080"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.klaviyo_private_key.as_deref(), Some("pk_live"));
    assert_eq!(settings.klaviyo_list_id.as_deref(), Some("UcNgUr"));
    assert_eq!(settings.mailerlite_api_key.as_deref(), Some("ml_key"));
    assert_eq!(settings.mailerlite_group_id.as_deref(), Some("42"));
    assert_eq!(settings.bind_addr, "0.0.0.0:8080");
}

#[test]
fn prefixed_form_wins_over_provider_variable() {
    let settings = settings_from_sources(
        no_file(),
        &env(&[
            ("KLAVIYO_LIST_ID", "from-plain"),
            ("APP__KLAVIYO_LIST_ID", "from-prefixed"),
        ]),
    )
    .expect("settings");
    assert_eq!(settings.klaviyo_list_id.as_deref(), Some("from-prefixed"));
}

#[test]
fn blank_credentials_count_as_missing() {
    assert_eq!(credential(&None), None);
    assert_eq!(credential(&Some("   ".into())), None);
    assert_eq!(credential(&Some(" key ".into())), Some("key"));
}
