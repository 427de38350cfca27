//! Locale metadata and fallback chains.
//!
//! The locale data file maps each locale to its metadata:
//!
//! ```json
//! {
//!   "es_MX": { "name": "Spanish (Mexico)", "localizedName": "Español (México)",
//!              "direction": "ltr", "fallbackLocales": ["es"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCALE: &str = "en";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallback_locales: Vec<String>,
}

#[derive(Debug)]
pub enum LocaleDataError {
    Json(serde_json::Error),
}

impl fmt::Display for LocaleDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleDataError::Json(err) => write!(f, "invalid locale data: {err}"),
        }
    }
}

impl std::error::Error for LocaleDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LocaleDataError::Json(err) => Some(err),
        }
    }
}

/// Locale metadata plus the locale every chain ends in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleData {
    locales: BTreeMap<String, LocaleInfo>,
    default_locale: String,
}

impl Default for LocaleData {
    fn default() -> Self {
        Self {
            locales: BTreeMap::new(),
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl LocaleData {
    pub fn from_json(json: &str) -> Result<Self, LocaleDataError> {
        let locales = serde_json::from_str(json).map_err(LocaleDataError::Json)?;
        Ok(Self {
            locales,
            ..Self::default()
        })
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    pub fn insert(&mut self, locale: impl Into<String>, info: LocaleInfo) {
        self.locales.insert(locale.into(), info);
    }

    pub fn get(&self, locale: &str) -> Option<&LocaleInfo> {
        self.locales.get(locale)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// `locale`, its declared fallbacks, then the default locale, without
    /// repeats. Locales with no metadata fall back straight to the default.
    pub fn fallback_chain(&self, locale: &str) -> LocaleFallbackChain {
        let declared = self
            .locales
            .get(locale)
            .map(|info| info.fallback_locales.as_slice())
            .unwrap_or_default();

        let mut chain: Vec<String> = Vec::with_capacity(declared.len() + 2);
        let candidates = std::iter::once(locale)
            .chain(declared.iter().map(String::as_str))
            .chain(std::iter::once(self.default_locale.as_str()));
        for candidate in candidates {
            if !chain.iter().any(|known| known == candidate) {
                chain.push(candidate.to_string());
            }
        }
        LocaleFallbackChain(chain)
    }
}

/// Locales to try, most specific first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleFallbackChain(Vec<String>);

impl LocaleFallbackChain {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LocaleFallbackChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DATA: &str = r#"{
        "es_MX": { "name": "Spanish (Mexico)", "fallbackLocales": ["es"] },
        "es": { "name": "Spanish", "localizedName": "Español" },
        "ar": { "direction": "rtl" },
        "en_GB": { "fallbackLocales": ["en", "en_GB"] }
    }"#;

    fn chain(data: &LocaleData, locale: &str) -> Vec<String> {
        data.fallback_chain(locale).as_slice().to_vec()
    }

    #[test]
    fn test_parse_locale_data() {
        let data = LocaleData::from_json(DATA).unwrap();
        assert_eq!(data.get("es").unwrap().localized_name.as_deref(), Some("Español"));
        assert_eq!(data.get("ar").unwrap().direction, Direction::Rtl);
        assert_eq!(data.get("es").unwrap().direction, Direction::Ltr);
        assert!(data.get("fr").is_none());
    }

    #[test]
    fn test_fallback_chain() {
        let data = LocaleData::from_json(DATA).unwrap();
        assert_eq!(chain(&data, "es_MX"), vec!["es_MX", "es", "en"]);
        assert_eq!(chain(&data, "fr"), vec!["fr", "en"]);
        assert_eq!(chain(&data, "en"), vec!["en"]);
        assert_eq!(chain(&data, "en_GB"), vec!["en_GB", "en"]);
        assert_eq!(data.fallback_chain("es_MX").to_string(), "es_MX -> es -> en");
    }

    #[test]
    fn test_custom_default_locale() {
        let data = LocaleData::from_json(DATA).unwrap().with_default_locale("es");
        assert_eq!(chain(&data, "es_MX"), vec!["es_MX", "es"]);
        assert_eq!(chain(&data, "fr"), vec!["fr", "es"]);
    }

    #[test]
    fn test_insert_locale() {
        let mut data = LocaleData::default();
        assert_eq!(chain(&data, "pt_BR"), vec!["pt_BR", "en"]);

        data.insert(
            "pt_BR",
            LocaleInfo {
                fallback_locales: vec!["pt".to_string()],
                ..LocaleInfo::default()
            },
        );
        assert_eq!(chain(&data, "pt_BR"), vec!["pt_BR", "pt", "en"]);
        assert_eq!(data.get("pt_BR").unwrap().direction, Direction::Ltr);
    }

    #[test]
    fn test_invalid_json() {
        let err = LocaleData::from_json("{ \"es\": 3 }").unwrap_err();
        assert!(err.to_string().starts_with("invalid locale data"));
    }
}
