use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{LocaleData, locale::DEFAULT_LOCALE};

pub const CONFIG_FILE_NAME: &str = ".fluentcrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_sources_root")]
    pub sources_root: String,
    #[serde(default = "default_locale")]
    pub base_locale: String,
    #[serde(default = "default_locale")]
    pub fallback_locale: String,
    /// Path to a locale data JSON file, relative to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_data: Option<String>,
}

fn default_sources_root() -> String {
    "./strings".to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            sources_root: default_sources_root(),
            base_locale: default_locale(),
            fallback_locale: default_locale(),
            locale_data: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or a
    /// locale field is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        if self.base_locale.is_empty() {
            anyhow::bail!("'baseLocale' must not be empty");
        }
        if self.fallback_locale.is_empty() {
            anyhow::bail!("'fallbackLocale' must not be empty");
        }
        Ok(())
    }

    /// Load the configured locale data, or an empty table when none is set.
    ///
    /// The table's default locale is always `fallbackLocale`.
    pub fn load_locale_data(&self, base_dir: &Path) -> Result<LocaleData> {
        let data = match &self.locale_data {
            Some(path) => {
                let path = base_dir.join(path);
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read locale data: {:?}", path))?;
                LocaleData::from_json(&content)
                    .with_context(|| format!("Failed to parse locale data: {:?}", path))?
            }
            None => LocaleData::default(),
        };
        Ok(data.with_default_locale(&self.fallback_locale))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.ignores.is_empty());
        assert_eq!(config.sources_root, "./strings");
        assert_eq!(config.base_locale, "en");
        assert_eq!(config.fallback_locale, "en");
        assert!(config.locale_data.is_none());
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "ignores": ["**/drafts/**"],
              "sourcesRoot": "./i18n",
              "baseLocale": "fr",
              "localeData": "locales.json"
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.ignores, vec!["**/drafts/**"]);
        assert_eq!(config.sources_root, "./i18n");
        assert_eq!(config.base_locale, "fr");
        assert_eq!(config.fallback_locale, "en");
        assert_eq!(config.locale_data.as_deref(), Some("locales.json"));
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("strings").join("nested");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        assert!(find_config_file(dir.path()).is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "ignores": ["**/test/**"] }"#,
        )
        .unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.ignores, vec!["**/test/**"]);
        assert_eq!(result.config.sources_root, "./strings");
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert!(result.config.ignores.is_empty());
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_empty_locale() {
        let config = Config {
            base_locale: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "ignores": ["[invalid"] }"#,
        )
        .unwrap();

        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_load_locale_data() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("locales.json"),
            r#"{ "es_MX": { "name": "Spanish (Mexico)", "localizedName": "Español (México)", "direction": "ltr", "fallbackLocales": ["es"] } }"#,
        )
        .unwrap();

        let config = Config {
            locale_data: Some("locales.json".to_string()),
            fallback_locale: "fr".to_string(),
            ..Default::default()
        };
        let data = config.load_locale_data(dir.path()).unwrap();
        assert_eq!(
            data.fallback_chain("es_MX").to_string(),
            "es_MX -> es -> fr"
        );
    }

    #[test]
    fn test_load_locale_data_missing_file() {
        let dir = tempdir().unwrap();
        let config = Config {
            locale_data: Some("nope.json".to_string()),
            ..Default::default()
        };
        let err = config.load_locale_data(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to read locale data"));
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = default_config_json().unwrap();
        assert!(json.contains("sourcesRoot"));
        assert!(json.contains("baseLocale"));
        assert!(!json.contains("localeData"));
    }
}
