//! moneytag CLI
//!
//! Renders one `money_localize` directive against variables supplied on
//! the command line and prints the result.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context as _, anyhow, bail};
use clap::Parser;
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use moneytag_core::directive::DIRECTIVE_NAME;
use moneytag_core::{Context, Directive, MoneyResolver, Value};
use moneytag_shared::{CurrencyCode, Locale, Money, Settings};

/// Render a money_localize directive.
#[derive(Parser, Debug)]
#[command(name = "moneytag", version, about)]
struct Cli {
    /// Directive, with or without the leading `money_localize`.
    directive: String,

    /// Bind a variable; the value is parsed as JSON, else taken as a string.
    #[arg(long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,

    /// Bind a money variable.
    #[arg(long = "money", value_name = "NAME=AMOUNT:CURRENCY")]
    money: Vec<String>,

    /// Viewer location code, e.g. US.
    #[arg(long)]
    location: Option<String>,

    /// Locale used for formatting, e.g. de_DE.
    #[arg(long)]
    locale: Option<String>,

    /// Currency override file; takes precedence over settings.
    #[arg(long, env = "MONEYTAG_OVERRIDES")]
    overrides: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("moneytag=debug,moneytag_core=debug,moneytag_shared=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "moneytag=info".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(path) = cli.overrides.clone() {
        settings = settings.with_currency_config_module(path);
    }
    info!(
        overrides = ?settings.currency_config_module,
        locale = %settings.default_locale,
        "Settings loaded"
    );

    let output = run(&cli, &settings)?;
    println!("{output}");
    Ok(())
}

fn run(cli: &Cli, settings: &Settings) -> anyhow::Result<String> {
    let source = if cli.directive.split_whitespace().next() == Some(DIRECTIVE_NAME) {
        cli.directive.clone()
    } else {
        format!("{DIRECTIVE_NAME} {}", cli.directive)
    };
    let directive = Directive::parse(&source).with_context(|| format!("Invalid directive: {source}"))?;

    let mut ctx = build_context(cli)?;
    let resolver = MoneyResolver::new(settings);
    let rendered = resolver.render(&directive, &mut ctx)?;

    let Some(name) = directive.output_var() else {
        return Ok(rendered);
    };
    debug!(variable = name, "Directive bound a variable");
    match ctx.get(name) {
        Some(Value::Money(money)) => {
            let locale = ctx.locale().cloned().unwrap_or_else(|| settings.locale());
            Ok(format!("{name} = {}", money.format(&locale)))
        }
        _ => bail!("variable {name} was not bound"),
    }
}

fn build_context(cli: &Cli) -> anyhow::Result<Context> {
    let mut ctx = Context::new();

    for assignment in &cli.vars {
        let (name, raw) = split_assignment(assignment)?;
        let value = match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(json) => Value::try_from(json).map_err(|e| anyhow!("--var {name}: {e}"))?,
            Err(_) => Value::Str(raw.to_string()),
        };
        ctx.set(name, value);
    }

    for assignment in &cli.money {
        let (name, raw) = split_assignment(assignment)?;
        ctx.set(name, parse_money(raw).with_context(|| format!("--money {name}"))?);
    }

    if let Some(location) = &cli.location {
        ctx = ctx.with_location(location.clone());
    }
    if let Some(locale) = &cli.locale {
        ctx = ctx.with_locale(Locale::parse_or_default(locale));
    }

    Ok(ctx)
}

fn split_assignment(assignment: &str) -> anyhow::Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("expected NAME=VALUE, got {assignment:?}"),
    }
}

fn parse_money(raw: &str) -> anyhow::Result<Money> {
    let (amount, currency) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("expected AMOUNT:CURRENCY, got {raw:?}"))?;
    let amount = Decimal::from_str(amount.trim()).with_context(|| format!("invalid amount {amount:?}"))?;
    let currency = CurrencyCode::from_str(currency)?;
    Ok(Money::new(amount, currency))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("moneytag").chain(args.iter().copied()))
    }

    #[test]
    fn test_run_amount_and_currency() {
        let out = run(&cli(&["'4.5' 'USD'"]), &Settings::default()).unwrap();
        assert_eq!(out, "$4.50");
    }

    #[test]
    fn test_run_with_money_var_and_locale() {
        let out = run(
            &cli(&["price", "--money", "price=1234.5:EUR", "--locale", "de_DE"]),
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(out, "1.234,50 €");
    }

    #[test]
    fn test_run_with_json_vars() {
        let out = run(
            &cli(&["money_localize a c off", "--var", "a=1234.5", "--var", "c=USD"]),
            &Settings::default(),
        )
        .unwrap();
        assert_eq!(out, "$1234.50");
    }

    #[test]
    fn test_run_binding_prints_variable() {
        let out = run(&cli(&["'4.5' 'USD' as m"]), &Settings::default()).unwrap();
        assert_eq!(out, "m = $4.50");
    }

    #[test]
    fn test_run_with_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overrides.json");
        std::fs::write(
            &path,
            r#"{"override_currency_by_location": {"US": {"USD": ["$", "US$"]}}}"#,
        )
        .unwrap();

        let settings = Settings::default().with_currency_config_module(&path);
        let out = run(&cli(&["'4.5' 'USD'", "--location", "us"]), &settings).unwrap();
        assert_eq!(out, "US$4.50");
    }

    #[test]
    fn test_bad_inputs() {
        assert!(split_assignment("novalue").is_err());
        assert!(split_assignment("=x").is_err());
        assert!(parse_money("4.5").is_err());
        assert!(parse_money("abc:USD").is_err());
        assert!(parse_money("4.5:DOLLARS").is_err());
        assert!(run(&cli(&["a b c d"]), &Settings::default()).is_err());
    }
}
