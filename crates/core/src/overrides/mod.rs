//! Location-conditioned currency symbol overrides.
//!
//! The override table is read from an optional configuration file and
//! consulted only when money is rendered directly, never when it is bound
//! to a variable.

mod cache;
mod table;

pub use cache::OverrideCache;
pub use table::{LocationOverrideTable, OVERRIDES_KEY, SymbolOverride};

use std::path::PathBuf;
use std::sync::Arc;

use moneytag_shared::{Settings, TagResult};

/// Where a resolver gets its override table from.
#[derive(Debug, Clone, Default)]
pub enum OverrideSource {
    /// No override file configured; nothing is ever substituted.
    #[default]
    Disabled,
    /// Loaded lazily through the process-wide [`OverrideCache`].
    Configured(PathBuf),
    /// A table supplied directly.
    Fixed(Arc<LocationOverrideTable>),
}

impl OverrideSource {
    /// Builds the source named by settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        settings
            .currency_config_module
            .clone()
            .map_or(Self::Disabled, Self::Configured)
    }

    /// Returns the table, loading it on first need.
    ///
    /// `Ok(None)` means overrides are disabled.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the configured file is invalid.
    pub fn table(&self) -> TagResult<Option<Arc<LocationOverrideTable>>> {
        match self {
            Self::Disabled => Ok(None),
            Self::Configured(path) => OverrideCache::global().get_or_load(path).map(Some),
            Self::Fixed(table) => Ok(Some(Arc::clone(table))),
        }
    }
}

impl From<LocationOverrideTable> for OverrideSource {
    fn from(table: LocationOverrideTable) -> Self {
        Self::Fixed(Arc::new(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let source = OverrideSource::from_settings(&Settings::default());
        assert!(matches!(source, OverrideSource::Disabled));
        assert!(source.table().unwrap().is_none());
    }

    #[test]
    fn test_configured_from_settings() {
        let settings = Settings::default().with_currency_config_module("conf/overrides.toml");
        assert!(matches!(
            OverrideSource::from_settings(&settings),
            OverrideSource::Configured(path) if path == PathBuf::from("conf/overrides.toml")
        ));
    }

    #[test]
    fn test_configured_missing_file_is_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let source = OverrideSource::Configured(dir.path().join("absent.toml"));
        let table = source.table().unwrap().unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_fixed_table() {
        let source = OverrideSource::from(LocationOverrideTable::empty());
        assert!(source.table().unwrap().is_some());
    }
}
