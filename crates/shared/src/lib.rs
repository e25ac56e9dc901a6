//! Shared types, errors, and configuration for moneytag.
//!
//! This crate provides the pieces every other crate builds on:
//! - Money values with decimal precision and ISO currency codes
//! - Locale conventions for rendering money
//! - The directive error taxonomy
//! - Settings loading

pub mod config;
pub mod error;
pub mod types;

pub use config::Settings;
pub use error::{ErrorKind, TagError, TagResult};
pub use types::{CurrencyCode, Locale, Money};
