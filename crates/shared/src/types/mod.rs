//! Common types used across the workspace.

pub mod locale;
pub mod money;

pub use locale::{Locale, SymbolPosition};
pub use money::{CurrencyCode, CurrencyInfo, Money};
