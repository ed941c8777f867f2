use docintel_forwarder::config::{
    AppConfig, CredentialCache, DocIntelligenceCredentials, FORM_RECOGNIZER_ENDPOINT_VAR,
    FORM_RECOGNIZER_KEY_VAR,
};
use serial_test::serial;
use std::env;

fn clear_credentials() {
    env::remove_var(FORM_RECOGNIZER_KEY_VAR);
    env::remove_var(FORM_RECOGNIZER_ENDPOINT_VAR);
}

#[test]
#[serial]
fn test_credentials_read_from_environment() {
    env::set_var(FORM_RECOGNIZER_KEY_VAR, "0123456789abcdef");
    env::set_var(
        FORM_RECOGNIZER_ENDPOINT_VAR,
        "https://myresource.cognitiveservices.azure.com/",
    );

    let credentials = DocIntelligenceCredentials::from_env().expect("credentials should load");
    assert_eq!(credentials.api_key, "0123456789abcdef");
    assert_eq!(
        credentials.endpoint,
        "https://myresource.cognitiveservices.azure.com/"
    );

    clear_credentials();
}

#[test]
#[serial]
fn test_cache_keeps_first_result_after_environment_changes() {
    clear_credentials();
    let cache = CredentialCache::from_env();
    assert!(cache.get().is_none());

    env::set_var(FORM_RECOGNIZER_KEY_VAR, "late-key");
    env::set_var(FORM_RECOGNIZER_ENDPOINT_VAR, "https://late.example.com");

    assert!(cache.get().is_none());

    clear_credentials();
}

#[test]
#[serial]
fn test_app_config_requires_simulator_key() {
    env::remove_var("SIMULATOR_API_KEY");
    assert!(AppConfig::from_env().is_err());

    env::set_var("SIMULATOR_API_KEY", "sim");
    env::set_var("PORT", "8123");
    env::set_var("SIMULATOR_DEBUG", "TRUE");
    let config = AppConfig::from_env().expect("config should load");
    assert_eq!(config.simulator_api_key, "sim");
    assert_eq!(config.port, 8123);
    assert!(config.debug_mode);

    env::set_var("PORT", "not-a-port");
    assert!(AppConfig::from_env().is_err());

    env::remove_var("SIMULATOR_API_KEY");
    env::remove_var("PORT");
    env::remove_var("SIMULATOR_DEBUG");
}
