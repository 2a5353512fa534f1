//! Application configuration

use camxuc_classifiers::{ClassifierConfig, NormalizerConfig};
use camxuc_telemetry::HistoryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Assistant configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Classifier backend settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// History store settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Additional normalization rules
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &crate::Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(backend) = cli.backend {
            config.classifier.backend = backend;
        }

        if let Some(endpoint) = &cli.endpoint {
            config.classifier.endpoint = Some(endpoint.clone());
        }

        if let Some(history) = &cli.history {
            config.history.path = history.clone();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cli;
    use camxuc_classifiers::ClassifierBackend;
    use clap::Parser;

    #[test]
    fn test_missing_file_uses_defaults() {
        let cli = Cli::parse_from(["camxuc", "interactive"]);
        let config = AppConfig::load("/nonexistent/camxuc.yaml", &cli).unwrap();
        assert_eq!(config.classifier.backend, ClassifierBackend::Lexicon);
        assert_eq!(config.history.limit, 50);
        assert!(config.normalizer.extra_tokens.is_empty());
    }

    #[test]
    fn test_file_then_cli_overrides() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("camxuc.yaml");
        std::fs::write(
            &path,
            r#"
classifier:
  backend: http
  endpoint: http://file-endpoint/classify
history:
  path: from-file.jsonl
  limit: 20
normalizer:
  extra_phrases:
    - pattern: hết sảy
      replacement: tuyệt vời
"#,
        )
        .unwrap();

        let path_str = path.to_str().unwrap();
        let cli = Cli::parse_from([
            "camxuc",
            "--endpoint",
            "http://cli-endpoint/classify",
            "interactive",
        ]);
        let config = AppConfig::load(path_str, &cli).unwrap();

        assert_eq!(config.classifier.backend, ClassifierBackend::Http);
        assert_eq!(
            config.classifier.endpoint.as_deref(),
            Some("http://cli-endpoint/classify")
        );
        assert_eq!(config.history.path, std::path::PathBuf::from("from-file.jsonl"));
        assert_eq!(config.history.limit, 20);
        assert_eq!(config.normalizer.extra_phrases.len(), 1);
    }
}
