use parley_config::{Config, OPENAI_API_KEY};
use parley_core::{ConfigurationError, ContextSource};
use tempfile::TempDir;

#[test]
fn partial_file_falls_back_to_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
  "agents": { "defaults": { "model": "gpt-4o", "context": "encyclopedia", "memory_window": 3 } },
  "providers": { "openai": { "api_key": "sk-file" } }
}"#,
    )?;

    let config = Config::load_from(&path)?;

    assert_eq!(config.agents.defaults.model, "gpt-4o");
    assert_eq!(config.agents.defaults.context, ContextSource::Encyclopedia);
    assert_eq!(config.agents.defaults.memory_window, 3);
    assert!((config.agents.defaults.creative_temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(config.openai_api_key()?, "sk-file");
    assert_eq!(config.providers.wikipedia.top_k, 3);
    assert_eq!(config.providers.request_timeout_secs, 30);
    Ok(())
}

#[test]
fn environment_overrides_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "providers": { "openai": { "api_key": "sk-file" } } }"#)?;

    let mut config = Config::load_from(&path)?;
    config.apply_env(|key| (key == OPENAI_API_KEY).then(|| "sk-env".to_string()));

    assert_eq!(config.openai_api_key()?, "sk-env");
    assert!(!config.search_enabled());
    Ok(())
}

#[test]
fn malformed_file_is_a_parse_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json")?;

    assert!(matches!(Config::load_from(&path), Err(ConfigurationError::Parse(_))));
    Ok(())
}

#[test]
fn unknown_context_source_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "agents": { "defaults": { "context": "oracle" } } }"#)?;

    assert!(matches!(Config::load_from(&path), Err(ConfigurationError::Parse(_))));
    Ok(())
}

#[test]
fn template_is_written_once() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let path = dir.path().join("config.json");

    Config::write_template(&path)?;
    let written = Config::load_from(&path)?;
    assert_eq!(written.agents.defaults.memory_window, 5);

    assert!(matches!(
        Config::write_template(&path),
        Err(ConfigurationError::Invalid(_))
    ));
    Ok(())
}
