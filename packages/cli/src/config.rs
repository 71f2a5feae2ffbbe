use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "paperclip.config.json";

/// Paperclip configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Seed for sequential ids of nodes and class names created by edits.
    /// Without one, edits get random uuids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_seed: Option<String>,

    /// Default tracing filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_pretty() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            id_seed: None,
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "pretty": false,
            "idSeed": "card",
            "logLevel": "debug"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(!config.pretty);
        assert_eq!(config.id_seed.as_deref(), Some("card"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "idSeed": "x" }"#).unwrap();
        assert!(config.pretty);
        assert_eq!(config.id_seed.as_deref(), Some("x"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_load_missing_and_present() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        assert_eq!(Config::load(&cwd).unwrap(), Config::default());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "pretty": false }"#).unwrap();
        let config = Config::load(&cwd).unwrap();
        assert!(!config.pretty);
        assert_eq!(config.id_seed, None);
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ nope").unwrap();

        assert!(Config::load(&dir.path().display().to_string()).is_err());
    }
}
