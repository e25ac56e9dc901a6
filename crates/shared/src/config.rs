//! Settings management.

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::Locale;

/// Environment variable prefix for settings overrides.
pub const ENV_PREFIX: &str = "MONEYTAG";

/// Rendering settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path to the currency override file. Overrides are disabled when unset.
    #[serde(default)]
    pub currency_config_module: Option<PathBuf>,
    /// Locale used when the render context does not name one.
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

fn default_locale() -> String {
    "en_US".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_config_module: None,
            default_locale: default_locale(),
        }
    }
}

impl Settings {
    /// Loads settings from config files and environment.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `MONEYTAG__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Sets the override file path.
    #[must_use]
    pub fn with_currency_config_module(mut self, path: impl Into<PathBuf>) -> Self {
        self.currency_config_module = Some(path.into());
        self
    }

    /// Resolves the default locale, falling back to `en_US` when unknown.
    #[must_use]
    pub fn locale(&self) -> Locale {
        Locale::parse_or_default(&self.default_locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.currency_config_module.is_none());
        assert_eq!(settings.default_locale, "en_US");
        assert_eq!(settings.locale().id(), "en_US");
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("MONEYTAG__CURRENCY_CONFIG_MODULE", Some("conf/overrides.toml")),
                ("MONEYTAG__DEFAULT_LOCALE", Some("de_DE")),
            ],
            || {
                let settings = Settings::load().unwrap();
                assert_eq!(
                    settings.currency_config_module,
                    Some(PathBuf::from("conf/overrides.toml"))
                );
                assert_eq!(settings.locale().id(), "de_DE");
            },
        );
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            ["MONEYTAG__CURRENCY_CONFIG_MODULE", "MONEYTAG__DEFAULT_LOCALE"],
            || {
                let settings = Settings::load().unwrap();
                assert!(settings.currency_config_module.is_none());
                assert_eq!(settings.default_locale, "en_US");
            },
        );
    }

    #[test]
    fn test_unknown_default_locale_falls_back() {
        let settings = Settings {
            default_locale: "tlh_KL".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.locale(), Locale::default());
    }
}
