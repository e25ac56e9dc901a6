//! Location-based currency symbol override table.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use moneytag_shared::{CurrencyCode, TagError, TagResult};

/// Key the override file exports its mapping under.
pub const OVERRIDES_KEY: &str = "override_currency_by_location";

/// One literal substitution applied to rendered money.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolOverride {
    /// Substring to replace.
    pub from: String,
    /// Replacement.
    pub to: String,
}

impl SymbolOverride {
    /// Creates an override pair.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Replaces every occurrence of `from` with `to`.
    #[must_use]
    pub fn apply(&self, rendered: &str) -> String {
        rendered.replace(&self.from, &self.to)
    }
}

/// Location code to currency code to substitution.
///
/// Keys are uppercase. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationOverrideTable {
    by_location: HashMap<String, HashMap<CurrencyCode, SymbolOverride>>,
}

#[derive(Debug, Default, Deserialize)]
struct OverrideFile {
    #[serde(default)]
    override_currency_by_location: HashMap<String, HashMap<String, (String, String)>>,
}

impl LocationOverrideTable {
    /// An empty table; no overrides apply.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from raw entries, normalizing keys to uppercase.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Config`] for malformed currency codes and empty
    /// `from` substrings.
    pub fn from_entries<L, C, F, T>(entries: L) -> TagResult<Self>
    where
        L: IntoIterator<Item = (String, C)>,
        C: IntoIterator<Item = (String, (F, T))>,
        F: Into<String>,
        T: Into<String>,
    {
        let mut by_location: HashMap<String, HashMap<CurrencyCode, SymbolOverride>> =
            HashMap::new();

        for (location, currencies) in entries {
            let location = location.trim().to_uppercase();
            let slot = by_location.entry(location.clone()).or_default();

            for (currency, (from, to)) in currencies {
                let code: CurrencyCode = currency.parse().map_err(|_| {
                    TagError::config(format!(
                        "invalid currency code {currency:?} for location {location}"
                    ))
                })?;
                let pair = SymbolOverride::new(from, to);
                if pair.from.is_empty() {
                    return Err(TagError::config(format!(
                        "empty source substring for {location}/{code}"
                    )));
                }
                slot.insert(code, pair);
            }
        }

        Ok(Self { by_location })
    }

    /// Loads a table from a TOML or JSON file.
    ///
    /// A missing file, or a file without [`OVERRIDES_KEY`], gives an empty
    /// table.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Config`] when the file exists but cannot be
    /// parsed or holds invalid entries.
    pub fn load(path: &Path) -> TagResult<Self> {
        let raw: OverrideFile = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .build()
            .and_then(config::Config::try_deserialize)
            .map_err(|e| TagError::config(format!("{}: {e}", path.display())))?;

        let table = Self::from_entries(raw.override_currency_by_location)?;
        debug!(
            path = %path.display(),
            locations = table.by_location.len(),
            "Loaded currency override table"
        );
        Ok(table)
    }

    /// Finds the substitution for a location and currency.
    ///
    /// The location is matched case-insensitively.
    #[must_use]
    pub fn lookup(&self, location: &str, currency: &CurrencyCode) -> Option<&SymbolOverride> {
        self.by_location
            .get(&location.trim().to_uppercase())?
            .get(currency)
    }

    /// Returns true when no location has overrides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_location.values().all(HashMap::is_empty)
    }

    /// Number of configured locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_location.len()
    }
}
