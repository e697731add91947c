use std::collections::HashMap;

use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_point_at_local_service() {
    let settings = layer_settings(None, env_from(&[]));
    assert_eq!(settings, ClientSettings::default());
    assert_eq!(
        settings.endpoint().expect("endpoint").as_str(),
        "http://localhost:8000/api/employees"
    );
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn file_values_override_defaults() {
    let raw = r#"
        api_base_url = "https://directory.example.com/v2"
        request_timeout_secs = 5
    "#;
    let settings = layer_settings(Some(raw), env_from(&[]));
    assert_eq!(settings.api_base_url, "https://directory.example.com/v2");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(5)));
}

#[test]
fn environment_overrides_file() {
    let raw = r#"api_base_url = "http://from-file:1/api""#;
    let settings = layer_settings(
        Some(raw),
        env_from(&[
            ("EMPLOYEE_API_URL", "http://legacy:2/api"),
            ("APP__API_BASE_URL", "http://preferred:3/api"),
        ]),
    );
    assert_eq!(settings.api_base_url, "http://preferred:3/api");
}

#[test]
fn blank_and_invalid_environment_values_are_ignored() {
    let settings = layer_settings(
        None,
        env_from(&[
            ("APP__API_BASE_URL", "   "),
            ("APP__REQUEST_TIMEOUT_SECS", "soon"),
        ]),
    );
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn unreadable_file_falls_back_to_defaults() {
    let settings = layer_settings(Some("api_base_url = ["), env_from(&[]));
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn endpoint_tolerates_trailing_slash() {
    let settings = ClientSettings {
        api_base_url: "http://127.0.0.1:9000/api/".into(),
        request_timeout_secs: None,
    };
    assert_eq!(
        settings.endpoint().expect("endpoint").as_str(),
        "http://127.0.0.1:9000/api/employees"
    );
}

#[test]
fn endpoint_on_bare_host() {
    let settings = ClientSettings {
        api_base_url: "http://127.0.0.1:9000".into(),
        request_timeout_secs: None,
    };
    assert_eq!(
        settings.endpoint().expect("endpoint").as_str(),
        "http://127.0.0.1:9000/employees"
    );
}

#[test]
fn endpoint_rejects_unparsable_base() {
    let settings = ClientSettings {
        api_base_url: "not a url".into(),
        request_timeout_secs: None,
    };
    assert!(matches!(
        settings.endpoint(),
        Err(ConfigError::InvalidBaseUrl { .. })
    ));

    let opaque = ClientSettings {
        api_base_url: "mailto:hr@example.com".into(),
        request_timeout_secs: None,
    };
    assert!(matches!(
        opaque.endpoint(),
        Err(ConfigError::OpaqueBaseUrl(_))
    ));
}

#[test]
fn missing_file_uses_defaults() {
    let settings = load_settings_from(Path::new("definitely/not/here/client.toml"));
    assert_eq!(settings.request_timeout_secs, None);
}
