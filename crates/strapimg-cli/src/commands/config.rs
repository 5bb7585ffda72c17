//! Config command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};

use strapimg_core::config::{setting_spec, SETTINGS};
use strapimg_core::{Config, SETTINGS_SECTION};

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            let mut values = serde_json::Map::new();
            for spec in SETTINGS {
                let value = config
                    .value_of(spec.key)
                    .map(|v| display_value(spec.secret, &v));
                values.insert(spec.key.to_string(), serde_json::json!(value));
            }
            println!("{}", serde_json::Value::Object(values));
        }
        OutputFormat::Quiet => {
            println!("{}", effective_path(config_path).display());
        }
        OutputFormat::Human => {
            println!("{}:", SETTINGS_SECTION);
            for spec in SETTINGS {
                let value = config
                    .value_of(spec.key)
                    .map(|v| display_value(spec.secret, &v))
                    .unwrap_or_else(|| "(not set)".to_string());
                println!("  {:<15} {}", format!("{}:", spec.key), value);
                println!("  {:<15} {} - {}", "", spec.label, spec.description);
            }
            println!();
            println!("Config file: {}", effective_path(config_path).display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    config.set_value(&key, &value)?;

    // Save to the CLI-specified path or default
    config
        .save_to_path(&effective_path(config_path))
        .context("Failed to save configuration")?;

    let secret = setting_spec(&key).map(|s| s.secret).unwrap_or(false);
    output.success(&format!("Set {} = {}", key, display_value(secret, &value)));

    Ok(())
}

/// Print the config file path
pub fn path(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let path = effective_path(config_path);
    match output.format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "path": path })),
        _ => println!("{}", path.display()),
    }
    Ok(())
}

fn effective_path(config_path: Option<&PathBuf>) -> PathBuf {
    config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path)
}

/// Mask secrets, keeping the last 4 characters
fn display_value(secret: bool, value: &str) -> String {
    if !secret {
        return value.to_string();
    }
    let count = value.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = value.chars().skip(count - 4).collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_value_masks_secrets() {
        assert_eq!(display_value(false, "https://cms"), "https://cms");
        assert_eq!(display_value(true, "abcdef123456"), "****3456");
        assert_eq!(display_value(true, "abc"), "****");
    }

    #[test]
    fn test_set_writes_to_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);

        set(
            "strapi_url".to_string(),
            "https://cms.example.com".to_string(),
            Some(&path),
            &output,
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("strapi_url = \"https://cms.example.com\""));
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let output = Output::new(OutputFormat::Quiet);

        let err = set("nope".to_string(), "x".to_string(), Some(&path), &output).unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
        assert!(!path.exists());
    }
}
