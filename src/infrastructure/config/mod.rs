//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::application::errors::ConfigError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    pub telegram: TelegramConfig,
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TelegramConfig {
    pub token: Option<String>,
    pub poll_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LibraryConfig {
    /// Folder whose subfolders are the categories
    pub root: PathBuf,
    /// File name every image is uploaded under
    pub attachment_name: String,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub token: Option<String>,
    pub pictures: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "picbot".to_string(),
            },
            telegram: TelegramConfig {
                token: None,
                poll_timeout_seconds: 30,
            },
            library: LibraryConfig {
                root: PathBuf::from("pictures"),
                attachment_name: "picture.jpg".to_string(),
            },
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// Build the effective config: file (or defaults) < environment < command line.
    ///
    /// A missing or broken file falls back to the defaults.
    pub fn resolve<F>(path: &Path, overrides: &Overrides, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            })
        } else {
            Config::default()
        };

        config.apply_env(env);
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Override values from `BOT_TOKEN` and `PICTURES_DIR`
    pub fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = env("BOT_TOKEN").filter(|t| !t.trim().is_empty()) {
            self.telegram.token = Some(token);
        }

        if let Some(root) = env("PICTURES_DIR").filter(|r| !r.trim().is_empty()) {
            self.library.root = PathBuf::from(root);
        }
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(token) = &overrides.token {
            self.telegram.token = Some(token.clone());
        }
        if let Some(root) = &overrides.pictures {
            self.library.root = root.clone();
        }
    }

    /// Token to run the Telegram adapter with, if any
    pub fn token(&self) -> Option<&str> {
        self.telegram
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.library.root.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("library.root".to_string()));
        }
        if self.library.attachment_name.trim().is_empty() {
            return Err(ConfigError::MissingField("library.attachment-name".to_string()));
        }
        if self.telegram.poll_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "telegram.poll-timeout-seconds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_round_trips_through_yaml() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("poll-timeout-seconds: 30"));
        assert!(yaml.contains("attachment-name: picture.jpg"));

        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.library.root, PathBuf::from("pictures"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
bot:
  name: cats-bot
telegram:
  token: "123:abc"
  poll-timeout-seconds: 10
library:
  root: /srv/pictures
  attachment-name: image.png
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.bot.name, "cats-bot");
        assert_eq!(config.token(), Some("123:abc"));
        assert_eq!(config.telegram.poll_timeout_seconds, 10);
        assert_eq!(config.library.root, PathBuf::from("/srv/pictures"));
    }

    #[test]
    fn test_blank_token_means_console() {
        let mut config = Config::default();
        config.telegram.token = Some("  ".to_string());
        assert_eq!(config.token(), None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.telegram.poll_timeout_seconds = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = Config::default();
        config.library.root = PathBuf::new();
        assert!(matches!(config.validate(), Err(ConfigError::MissingField(_))));
    }

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, body).unwrap();
        path
    }

    const FILE: &str = r#"
bot:
  name: from-file
telegram:
  token: file-token
  poll-timeout-seconds: 10
library:
  root: /file/pictures
  attachment-name: file.jpg
"#;

    #[test]
    fn test_resolve_uses_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, FILE);

        let config = Config::resolve(&path, &Overrides::default(), env_of(&[])).unwrap();
        assert_eq!(config.bot.name, "from-file");
        assert_eq!(config.token(), Some("file-token"));
        assert_eq!(config.library.root, PathBuf::from("/file/pictures"));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, FILE);
        let env = env_of(&[("BOT_TOKEN", "env-token"), ("PICTURES_DIR", "/env/pictures")]);

        let config = Config::resolve(&path, &Overrides::default(), env).unwrap();
        assert_eq!(config.bot.name, "from-file");
        assert_eq!(config.token(), Some("env-token"));
        assert_eq!(config.library.root, PathBuf::from("/env/pictures"));
    }

    #[test]
    fn test_blank_env_does_not_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, FILE);
        let env = env_of(&[("BOT_TOKEN", " "), ("PICTURES_DIR", "")]);

        let config = Config::resolve(&path, &Overrides::default(), env).unwrap();
        assert_eq!(config.token(), Some("file-token"));
        assert_eq!(config.library.root, PathBuf::from("/file/pictures"));
    }

    #[test]
    fn test_command_line_overrides_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, FILE);
        let env = env_of(&[("BOT_TOKEN", "env-token"), ("PICTURES_DIR", "/env/pictures")]);
        let overrides = Overrides {
            token: Some("cli-token".to_string()),
            pictures: Some(PathBuf::from("/cli/pictures")),
        };

        let config = Config::resolve(&path, &overrides, env).unwrap();
        assert_eq!(config.token(), Some("cli-token"));
        assert_eq!(config.library.root, PathBuf::from("/cli/pictures"));
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "bot: [");
        let env = env_of(&[("BOT_TOKEN", "env-token")]);

        let config = Config::resolve(&path, &Overrides::default(), env).unwrap();
        assert_eq!(config.bot.name, "picbot");
        assert_eq!(config.token(), Some("env-token"));
        assert_eq!(config.library.root, PathBuf::from("pictures"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let config = Config::resolve(&path, &Overrides::default(), env_of(&[])).unwrap();
        assert_eq!(config.token(), None);
        assert_eq!(config.telegram.poll_timeout_seconds, 30);
    }

    #[test]
    fn test_resolve_validates_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, &FILE.replace("poll-timeout-seconds: 10", "poll-timeout-seconds: 0"));

        let err = Config::resolve(&path, &Overrides::default(), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_broken_yaml_is_parse_error() {
        assert!(matches!(Config::from_yaml("bot: ["), Err(ConfigError::Parse(_))));
    }
}
