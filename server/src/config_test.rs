use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn empty_environment_uses_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.client, ClientConfig::default());
    assert_eq!(cfg.client.session.refresh_interval_secs, 30);
    assert_eq!(cfg.client.session.min_validity_secs, 60);
}

#[test]
fn overrides_are_applied_and_trailing_slashes_trimmed() {
    let cfg = ServerConfig::from_lookup(lookup(&[
        ("PORT", "8081"),
        ("KEYCLOAK_URL", "https://sso.example.test/"),
        ("KEYCLOAK_REALM", "movies"),
        ("KEYCLOAK_CLIENT_ID", "web"),
        ("KEYCLOAK_JS_URL", "/static/keycloak.js"),
        ("MOVIES_API_URL", "https://api.example.test/api/"),
        ("AUTH_API_URL", "https://auth.example.test"),
        ("SESSION_REFRESH_SECS", "15"),
        ("SESSION_MIN_VALIDITY_SECS", "90"),
    ]))
    .unwrap();

    assert_eq!(cfg.port, 8081);
    assert_eq!(cfg.client.identity.url, "https://sso.example.test");
    assert_eq!(cfg.client.identity.realm, "movies");
    assert_eq!(cfg.client.identity.client_id, "web");
    assert_eq!(cfg.client.identity.script_url, "/static/keycloak.js");
    assert_eq!(cfg.client.movies_api_url, "https://api.example.test/api");
    assert_eq!(cfg.client.auth_api_url, "https://auth.example.test");
    assert_eq!(cfg.client.session.refresh_interval_secs, 15);
    assert_eq!(cfg.client.session.min_validity_secs, 90);
    assert_eq!(cfg.client.session.admin_role, SessionConfig::default().admin_role);
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "  "), ("KEYCLOAK_REALM", "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.client.identity.realm, IdentityProviderConfig::default().realm);
}

#[test]
fn invalid_numbers_are_rejected() {
    assert_eq!(
        ServerConfig::from_lookup(lookup(&[("PORT", "http")])),
        Err(ConfigError::Invalid { var: "PORT", value: "http".to_owned() })
    );
    assert_eq!(
        ServerConfig::from_lookup(lookup(&[("SESSION_REFRESH_SECS", "soon")])),
        Err(ConfigError::Invalid { var: "SESSION_REFRESH_SECS", value: "soon".to_owned() })
    );
    assert_eq!(
        ServerConfig::from_lookup(lookup(&[("SESSION_MIN_VALIDITY_SECS", "0")])),
        Err(ConfigError::Zero { var: "SESSION_MIN_VALIDITY_SECS" })
    );
}

#[test]
fn client_config_round_trips_through_the_shell_embedding() {
    let cfg = ServerConfig::from_lookup(lookup(&[("KEYCLOAK_REALM", "movies")])).unwrap();
    let embedded = cfg.to_client_config().to_json();
    assert_eq!(ClientConfig::from_json(&embedded).unwrap(), cfg.client);
}

#[test]
fn from_env_reads_process_environment() {
    // Only touches a variable no other test reads.
    unsafe { std::env::set_var("KEYCLOAK_CLIENT_ID", "env-client") };
    let cfg = ServerConfig::from_env().unwrap();
    unsafe { std::env::remove_var("KEYCLOAK_CLIENT_ID") };
    assert_eq!(cfg.client.identity.client_id, "env-client");
}
