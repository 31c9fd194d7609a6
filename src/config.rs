use crate::preferences::{Language, Preferences, Theme};
use anyhow::{Context, Result, bail};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".study-tracker";
const CONFIG_FILE: &str = "config.json";
const DB_FILE: &str = "study_hours.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub db_path: PathBuf,
    pub default_language: Language,
    pub default_theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_root_dir().join(DB_FILE),
            default_language: Language::default(),
            default_theme: Theme::default(),
        }
    }
}

impl Config {
    pub fn config_path() -> PathBuf {
        default_root_dir().join(CONFIG_FILE)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    /// Missing config is not an error: defaults are written out on first run.
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::config_path();
        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        let config = Self::default();
        config.save_to(&config_path)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;
        set_mode_600(config_path)?;

        Ok(())
    }

    pub fn ensure_bootstrap_files(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create DB directory: {}", parent.display()))?;
        }

        Ok(())
    }

    pub fn default_preferences(&self) -> Preferences {
        Preferences {
            language: self.default_language,
            theme: self.default_theme,
        }
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match normalize_config_key(key) {
            "db_path" => {
                if value.trim().is_empty() {
                    bail!("db_path must not be empty");
                }
                self.db_path = expand_home(value.trim());
            }
            "default_language" => {
                self.default_language = value.parse()?;
            }
            "default_theme" => {
                self.default_theme = value.parse()?;
            }
            _ => {
                bail!(
                    "Unsupported config key: {key}. Supported keys: db_path|db.path, default_language|defaults.language, default_theme|defaults.theme"
                );
            }
        }

        Ok(())
    }

    pub fn get_value(&self, key: &str) -> Option<String> {
        match normalize_config_key(key) {
            "db_path" => Some(self.db_path.display().to_string()),
            "default_language" => Some(self.default_language.to_string()),
            "default_theme" => Some(self.default_theme.to_string()),
            _ => None,
        }
    }
}

fn normalize_config_key(key: &str) -> &str {
    match key {
        "db_path" | "db.path" => "db_path",
        "default_language" | "defaults.language" => "default_language",
        "default_theme" | "defaults.theme" => "default_theme",
        _ => key,
    }
}

pub fn expand_home(raw: &str) -> PathBuf {
    raw.strip_prefix("~/")
        .and_then(|stripped| home_dir().map(|home| home.join(stripped)))
        .unwrap_or_else(|| PathBuf::from(raw))
}

fn default_root_dir() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn set_mode_600(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("Failed to set file permissions: {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Config, expand_home};
    use crate::preferences::{Language, Theme};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn set_value_accepts_dotted_aliases() {
        let mut config = Config::default();

        config.set_value("defaults.language", "es").expect("language");
        config.set_value("default_theme", "dark").expect("theme");
        config.set_value("db.path", "/tmp/study.db").expect("db path");

        assert_eq!(config.default_language, Language::Spanish);
        assert_eq!(config.default_theme, Theme::Dark);
        assert_eq!(config.get_value("db_path").as_deref(), Some("/tmp/study.db"));
    }

    #[test]
    fn set_value_rejects_unknown_keys_and_codes() {
        let mut config = Config::default();

        assert!(config.set_value("api.port", "80").is_err());
        assert!(config.set_value("defaults.language", "fr").is_err());
        assert!(config.set_value("db.path", "  ").is_err());
        assert_eq!(config.get_value("api.port"), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            db_path: dir.path().join("study.db"),
            default_language: Language::Spanish,
            default_theme: Theme::Dark,
        };

        config.save_to(&path).expect("save");
        assert_eq!(Config::load_from(&path).expect("load"), config);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_theme":"dark"}"#).expect("write");

        let config = Config::load_from(&path).expect("load");
        assert_eq!(config.default_theme, Theme::Dark);
        assert_eq!(config.default_language, Language::English);
    }

    #[test]
    fn expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/var/db.sqlite"), PathBuf::from("/var/db.sqlite"));
    }
}
