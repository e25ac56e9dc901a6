//! Locale number-format conventions used to render money.

use rust_decimal::prelude::*;
use tracing::warn;

use super::money::Money;

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$4.50`
    Prefix,
    /// `4,50 €`
    Suffix,
}

/// Number-format conventions for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    id: &'static str,
    decimal_separator: char,
    group_separator: Option<char>,
    symbol_position: SymbolPosition,
    symbol_spacing: bool,
}

const BUILTIN: &[Locale] = &[
    Locale::builtin("en_US", '.', Some(','), SymbolPosition::Prefix, false),
    Locale::builtin("en_GB", '.', Some(','), SymbolPosition::Prefix, false),
    Locale::builtin("de_DE", ',', Some('.'), SymbolPosition::Suffix, true),
    Locale::builtin("fr_FR", ',', Some('\u{202f}'), SymbolPosition::Suffix, true),
    Locale::builtin("id_ID", ',', Some('.'), SymbolPosition::Prefix, false),
    Locale::builtin("ja_JP", '.', Some(','), SymbolPosition::Prefix, false),
];

impl Locale {
    const fn builtin(
        id: &'static str,
        decimal_separator: char,
        group_separator: Option<char>,
        symbol_position: SymbolPosition,
        symbol_spacing: bool,
    ) -> Self {
        Self {
            id,
            decimal_separator,
            group_separator,
            symbol_position,
            symbol_spacing,
        }
    }

    /// Locale-independent format: no grouping, `.` decimal, symbol first.
    #[must_use]
    pub const fn neutral() -> Self {
        Self::builtin("C", '.', None, SymbolPosition::Prefix, false)
    }

    /// Looks up a built-in locale.
    ///
    /// Accepts `en_US`, `en-US` and any casing of either.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        let normalized = id.trim().replace('-', "_");
        BUILTIN
            .iter()
            .find(|locale| locale.id.eq_ignore_ascii_case(&normalized))
            .cloned()
    }

    /// Looks up a built-in locale, falling back to `en_US`.
    #[must_use]
    pub fn parse_or_default(id: &str) -> Self {
        Self::parse(id).unwrap_or_else(|| {
            warn!(locale = %id, "Unknown locale, falling back to en_US");
            Self::default()
        })
    }

    /// Locale identifier, e.g. `en_US`.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// Formats a money value with these conventions.
    ///
    /// The amount is rounded to the currency's minor digits with banker's
    /// rounding for display; the value itself is not modified.
    #[must_use]
    pub fn format_money(&self, money: &Money) -> String {
        let places = money.currency.decimal_places();
        let rounded = money
            .amount
            .abs()
            .round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven);
        let negative = money.amount.is_sign_negative() && !rounded.is_zero();

        let digits = format!("{rounded:.prec$}", prec = places as usize);
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits.as_str(), None),
        };

        let mut number = self.group_digits(int_part);
        if let Some(frac) = frac_part {
            number.push(self.decimal_separator);
            number.push_str(frac);
        }

        let symbol = money.currency.symbol();
        let spaced = self.symbol_spacing || is_word_symbol(symbol);
        let sep = if spaced { " " } else { "" };
        let sign = if negative { "-" } else { "" };

        match self.symbol_position {
            SymbolPosition::Prefix => format!("{sign}{symbol}{sep}{number}"),
            SymbolPosition::Suffix => format!("{sign}{number}{sep}{symbol}"),
        }
    }

    fn group_digits(&self, int_part: &str) -> String {
        let Some(group) = self.group_separator else {
            return int_part.to_string();
        };

        let len = int_part.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(group);
            }
            out.push(ch);
        }
        out
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::builtin("en_US", '.', Some(','), SymbolPosition::Prefix, false)
    }
}

/// `CHF`, `XYZ`: alphabetic symbols read as words and need a space.
fn is_word_symbol(symbol: &str) -> bool {
    symbol.len() >= 3 && symbol.chars().all(|c| c.is_ascii_alphabetic())
}
