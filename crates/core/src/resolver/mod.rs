//! Render-time resolution of `money_localize` directives.
//!
//! A [`MoneyResolver`] turns a parsed [`Directive`] and a live [`Context`]
//! into either formatted output or a variable binding. Location overrides
//! apply to formatted output only.


use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use moneytag_shared::{CurrencyCode, Locale, Money, Settings, TagError, TagResult};

use crate::context::{Context, Value};
use crate::directive::{Directive, ValueSource};
use crate::overrides::OverrideSource;

/// Resolves directives against render contexts.
#[derive(Debug, Clone)]
pub struct MoneyResolver {
    overrides: OverrideSource,
    default_locale: Locale,
}

impl MoneyResolver {
    /// Creates a resolver from settings.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            overrides: OverrideSource::from_settings(settings),
            default_locale: settings.locale(),
        }
    }

    /// Replaces the override source.
    #[must_use]
    pub fn with_overrides(mut self, overrides: impl Into<OverrideSource>) -> Self {
        self.overrides = overrides.into();
        self
    }

    /// Replaces the locale used when the context has none.
    #[must_use]
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Resolves the directive's money value and attaches its localize flag.
    ///
    /// # Errors
    ///
    /// - [`TagError::NotMoney`] if a single reference is not a money value
    /// - [`TagError::MissingAmountAndCurrency`] if nothing resolved
    /// - [`TagError::MissingOperand`] if only one of amount and currency resolved
    /// - [`TagError::InvalidAmount`] / [`TagError::InvalidCurrency`] on failed coercion
    pub fn resolve_money(&self, directive: &Directive, ctx: &Context) -> TagResult<Money> {
        let money = match directive.source() {
            ValueSource::Single(expr) => match expr.resolve(ctx) {
                Value::Money(money) => money,
                // Falls through to the amount/currency requirement.
                Value::None => return Err(TagError::MissingAmountAndCurrency),
                _ => return Err(TagError::NotMoney(expr.describe())),
            },
            ValueSource::AmountCurrency { amount, currency } => {
                match (amount.resolve(ctx), currency.resolve(ctx)) {
                    (Value::None, Value::None) => return Err(TagError::MissingAmountAndCurrency),
                    (Value::None, _) => return Err(TagError::MissingOperand("amount")),
                    (_, Value::None) => return Err(TagError::MissingOperand("currency")),
                    (amount, currency) => {
                        Money::new(coerce_amount(&amount)?, coerce_currency(&currency)?)
                    }
                }
            }
        };

        Ok(money.with_localize(directive.localize()))
    }

    /// Renders a directive.
    ///
    /// With `as <name>` the money value is bound into the context and the
    /// output is empty. Otherwise the formatted string is returned, with
    /// the viewer location's override applied.
    ///
    /// # Errors
    ///
    /// Any error from [`MoneyResolver::resolve_money`], or a configuration
    /// error if the override file is invalid.
    pub fn render(&self, directive: &Directive, ctx: &mut Context) -> TagResult<String> {
        let money = self.resolve_money(directive, ctx)?;
        let location = ctx.try_location();

        if let Some(name) = directive.output_var() {
            debug!(variable = name, currency = %money.currency, "Binding money value");
            ctx.set(name, money);
            return Ok(String::new());
        }

        let locale = ctx
            .locale()
            .cloned()
            .unwrap_or_else(|| self.default_locale.clone());
        self.format_with_overrides(&money, location.as_deref(), &locale)
    }

    /// Formats money and applies the override for `location`, if any.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the override file is invalid.
    pub fn format_with_overrides(
        &self,
        money: &Money,
        location: Option<&str>,
        locale: &Locale,
    ) -> TagResult<String> {
        let rendered = money.format(locale);

        let Some(location) = location else {
            return Ok(rendered);
        };
        let Some(table) = self.overrides.table()? else {
            return Ok(rendered);
        };

        match table.lookup(location, &money.currency) {
            Some(pair) => {
                debug!(
                    location = %location.to_uppercase(),
                    currency = %money.currency,
                    from = %pair.from,
                    to = %pair.to,
                    "Applying currency symbol override"
                );
                Ok(pair.apply(&rendered))
            }
            None => Ok(rendered),
        }
    }
}

impl Default for MoneyResolver {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

fn coerce_amount(value: &Value) -> TagResult<Decimal> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Str(s) => {
            Decimal::from_str(s.trim()).map_err(|_| TagError::InvalidAmount(s.clone()))
        }
        other => Err(TagError::InvalidAmount(format!(
            "expected a number, got {}",
            other.type_name()
        ))),
    }
}

fn coerce_currency(value: &Value) -> TagResult<CurrencyCode> {
    match value {
        Value::Str(s) => s.parse(),
        other => Err(TagError::InvalidCurrency(format!(
            "expected a currency code, got {}",
            other.type_name()
        ))),
    }
}
