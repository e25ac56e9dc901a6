//! End-to-end tests for the `money_localize` directive.
//!
//! Drives the public API with override files on disk, loaded through
//! settings and the process-wide cache.

use std::path::{Path, PathBuf};

use rust_decimal_macros::dec;
use moneytag_core::{
    context::{COUNTRY_CODE_KEY, REQUEST_KEY},
    Context, Directive, MoneyResolver, OverrideCache, Value,
};
use moneytag_shared::{CurrencyCode, ErrorKind, Money, Settings};

/// Write an override file mapping US/USD and DE/EUR.
fn write_overrides(dir: &Path) -> PathBuf {
    let path = dir.join("currency_overrides.toml");
    std::fs::write(
        &path,
        r#"
[override_currency_by_location.US]
USD = ["$", "US$"]

[override_currency_by_location.de]
EUR = ["€", "EUR"]
"#,
    )
    .expect("Failed to write override file");
    path
}

fn resolver_for(path: &Path) -> MoneyResolver {
    MoneyResolver::new(&Settings::default().with_currency_config_module(path))
}

fn request(country: &str) -> Value {
    [(COUNTRY_CODE_KEY, country)].into_iter().collect()
}

fn usd() -> CurrencyCode {
    "USD".parse().unwrap()
}

// ============================================================================
// Formatting with overrides loaded from settings
// ============================================================================

#[test]
fn test_override_applied_for_request_location() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = resolver_for(&write_overrides(dir.path()));
    let directive = Directive::parse("money_localize '4.5' 'USD'").unwrap();

    let mut ctx = Context::new().with_var(REQUEST_KEY, request("us"));
    assert_eq!(resolver.render(&directive, &mut ctx).unwrap(), "US$4.50");
}

#[test]
fn test_lowercase_location_key_in_file() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = resolver_for(&write_overrides(dir.path()));
    let directive = Directive::parse("money_localize price").unwrap();

    let mut ctx = Context::new()
        .with_var("price", Money::new(dec!(10), "EUR".parse().unwrap()))
        .with_location("DE");
    assert_eq!(resolver.render(&directive, &mut ctx).unwrap(), "EUR10.00");
}

#[test]
fn test_repeated_render_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = resolver_for(&write_overrides(dir.path()));
    let directive = Directive::parse("money_localize amount 'USD'").unwrap();

    let mut ctx = Context::new()
        .with_var("amount", dec!(99.99))
        .with_location("US");
    let first = resolver.render(&directive, &mut ctx).unwrap();
    let second = resolver.render(&directive, &mut ctx).unwrap();
    assert_eq!(first, "US$99.99");
    assert_eq!(first, second);
}

#[test]
fn test_missing_override_file_disables_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = resolver_for(&dir.path().join("nowhere.toml"));
    let directive = Directive::parse("money_localize '4.5' 'USD'").unwrap();

    let mut ctx = Context::new().with_location("US");
    assert_eq!(resolver.render(&directive, &mut ctx).unwrap(), "$4.50");
}

#[test]
fn test_broken_override_file_fails_render_only_when_needed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[override_currency_by_location.US\n").unwrap();
    let resolver = resolver_for(&path);
    let directive = Directive::parse("money_localize '4.5' 'USD'").unwrap();

    // No location: the table is never consulted.
    let mut ctx = Context::new();
    assert_eq!(resolver.render(&directive, &mut ctx).unwrap(), "$4.50");

    let mut ctx = Context::new().with_location("US");
    let err = resolver.render(&directive, &mut ctx).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_table_is_cached_per_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_overrides(dir.path());
    let resolver = resolver_for(&path);
    let directive = Directive::parse("money_localize '1' 'USD'").unwrap();

    let mut ctx = Context::new().with_location("US");
    resolver.render(&directive, &mut ctx).unwrap();
    assert!(OverrideCache::global().contains(&path));
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn test_bind_then_render_bound_value() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = resolver_for(&write_overrides(dir.path()));
    let mut ctx = Context::new()
        .with_var("amount", "1234.5")
        .with_var("currency", "usd")
        .with_location("US");

    let bind = Directive::parse("money_localize amount currency on as total").unwrap();
    assert_eq!(resolver.render(&bind, &mut ctx).unwrap(), "");
    assert_eq!(
        ctx.get("total"),
        Some(&Value::Money(Money::new(dec!(1234.5), usd())))
    );

    // Rendering the bound value directly does apply the override.
    let show = Directive::parse("money_localize total").unwrap();
    assert_eq!(resolver.render(&show, &mut ctx).unwrap(), "US$1,234.50");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_parse_errors_are_syntax() {
    for source in [
        "money_localize",
        "money_localize a b c d",
        "money_localize x y z as",
    ] {
        let err = Directive::parse(source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "{source}");
    }
}

#[test]
fn test_non_money_reference_is_type_error() {
    let resolver = MoneyResolver::default();
    let directive = Directive::parse("money_localize price").unwrap();
    let mut ctx = Context::new().with_var("price", dec!(4.5));

    let err = resolver.render(&directive, &mut ctx).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert_eq!(
        err.to_string(),
        "The variable \"price\" must be an instance of Money."
    );
}
