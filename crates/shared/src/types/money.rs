//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money.
//! Amounts are `rust_decimal::Decimal` from parsing to display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::locale::Locale;
use crate::error::TagError;

/// Represents a monetary amount with currency and a localization flag.
///
/// The amount and currency never change after creation; only the
/// `localize` flag is attached later by the directive that renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major units (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g., "USD", "IDR").
    pub currency: CurrencyCode,
    /// Whether formatting follows locale conventions.
    #[serde(default = "default_localize")]
    pub localize: bool,
}

fn default_localize() -> bool {
    true
}

/// Three-letter ISO 4217 currency code, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

/// Display metadata for a known currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    /// Display symbol.
    pub symbol: &'static str,
    /// Number of minor-unit digits.
    pub decimal_places: u32,
}

const KNOWN_CURRENCIES: &[(&str, CurrencyInfo)] = &[
    ("USD", CurrencyInfo { symbol: "$", decimal_places: 2 }),
    ("EUR", CurrencyInfo { symbol: "€", decimal_places: 2 }),
    ("GBP", CurrencyInfo { symbol: "£", decimal_places: 2 }),
    ("JPY", CurrencyInfo { symbol: "¥", decimal_places: 0 }),
    ("IDR", CurrencyInfo { symbol: "Rp", decimal_places: 2 }),
    ("SGD", CurrencyInfo { symbol: "S$", decimal_places: 2 }),
    ("AUD", CurrencyInfo { symbol: "A$", decimal_places: 2 }),
    ("CAD", CurrencyInfo { symbol: "CA$", decimal_places: 2 }),
    ("CHF", CurrencyInfo { symbol: "CHF", decimal_places: 2 }),
    ("CNY", CurrencyInfo { symbol: "CN¥", decimal_places: 2 }),
    ("INR", CurrencyInfo { symbol: "₹", decimal_places: 2 }),
    ("BRL", CurrencyInfo { symbol: "R$", decimal_places: 2 }),
];

impl CurrencyCode {
    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns metadata for known currencies.
    #[must_use]
    pub fn info(&self) -> Option<CurrencyInfo> {
        KNOWN_CURRENCIES
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, info)| *info)
    }

    /// Display symbol; unknown codes render as the code itself.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self.info() {
            Some(info) => info.symbol,
            None => &self.0,
        }
    }

    /// Number of minor-unit digits, 2 for unknown codes.
    #[must_use]
    pub fn decimal_places(&self) -> u32 {
        self.info().map_or(2, |info| info.decimal_places)
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(TagError::InvalidCurrency(s.to_string()))
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = TagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl Money {
    /// Creates a new Money instance with localization enabled.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self {
            amount,
            currency,
            localize: true,
        }
    }

    /// Returns the same value with the localization flag set.
    #[must_use]
    pub fn with_localize(mut self, localize: bool) -> Self {
        self.localize = localize;
        self
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Renders the value for display in the given locale.
    ///
    /// With `localize` off the locale is ignored and the number is written
    /// without grouping, using `.` as the decimal separator.
    #[must_use]
    pub fn format(&self, locale: &Locale) -> String {
        if self.localize {
            locale.format_money(self)
        } else {
            Locale::neutral().format_money(self)
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format(&Locale::default()))
    }
}
