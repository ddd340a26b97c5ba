//! Unit tests for the config service, with the store mocked out.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use agentmart_cli::application::ports::ConfigStore;
use agentmart_cli::application::services::config_service;
use agentmart_cli::domain::config::AgentmartConfig;
use agentmart_cli::domain::error::ConfigError;
use anyhow::Result;
use mockall::predicate::function;

mockall::mock! {
    pub Store {}
    impl ConfigStore for Store {
        fn load(&self) -> Result<AgentmartConfig>;
        fn save(&self, config: &AgentmartConfig) -> Result<()>;
        fn path(&self) -> Result<PathBuf>;
    }
}

#[test]
fn set_value_loads_applies_and_saves() {
    let mut store = MockStore::new();
    store
        .expect_load()
        .times(1)
        .returning(|| Ok(AgentmartConfig::default()));
    store
        .expect_save()
        .with(function(|c: &AgentmartConfig| {
            c.api.base_url == "https://market.example.com/api" && !c.output.reveal_secrets
        }))
        .times(1)
        .returning(|_| Ok(()));

    let config =
        config_service::set_value(&store, "api.base_url", "https://market.example.com/api")
            .unwrap();
    assert_eq!(config.api.base_url, "https://market.example.com/api");
}

#[test]
fn set_value_rejects_unknown_key_without_saving() {
    let mut store = MockStore::new();
    store
        .expect_load()
        .returning(|| Ok(AgentmartConfig::default()));
    store.expect_save().never();

    let err = config_service::set_value(&store, "api.timeout", "5").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnknownKey { .. })
    ));
}

#[test]
fn set_value_rejects_bad_boolean_without_saving() {
    let mut store = MockStore::new();
    store
        .expect_load()
        .returning(|| Ok(AgentmartConfig::default()));
    store.expect_save().never();

    let err = config_service::set_value(&store, "output.reveal_secrets", "yes").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn load_failure_propagates() {
    let mut store = MockStore::new();
    store
        .expect_load()
        .returning(|| Err(anyhow::anyhow!("cannot parse config.yaml")));
    store.expect_save().never();
    let err = config_service::set_value(&store, "output.reveal_secrets", "true").unwrap_err();
    assert!(err.to_string().contains("cannot parse"));
}
