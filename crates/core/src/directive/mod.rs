//! `money_localize` directive parsing.
//!
//! ```text
//! money_localize <money_ref> [on|off] [as <var_name>]
//! money_localize <amount_ref> <currency_ref> [on|off] [as <var_name>]
//! ```
//!
//! Parsing happens once per directive occurrence and yields an immutable
//! [`Directive`]. Token references stay unresolved until render time.

mod expr;

pub use expr::Expr;

use moneytag_shared::{TagError, TagResult};

/// Default directive name.
pub const DIRECTIVE_NAME: &str = "money_localize";

/// Where the money value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// A reference that must resolve to a money value.
    Single(Expr),
    /// Separate amount and currency references.
    AmountCurrency {
        /// Amount reference.
        amount: Expr,
        /// Currency reference.
        currency: Expr,
    },
}

/// A parsed `money_localize` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    source: ValueSource,
    localize: bool,
    output_var: Option<String>,
}

impl Directive {
    /// Builds a directive from its parts.
    #[must_use]
    pub fn new(source: ValueSource, localize: bool, output_var: Option<String>) -> Self {
        Self {
            source,
            localize,
            output_var,
        }
    }

    /// Parses a directive by splitting on whitespace.
    ///
    /// # Errors
    ///
    /// See [`Directive::parse_tokens`].
    ///
    /// # Example
    ///
    /// ```
    /// use moneytag_core::directive::Directive;
    ///
    /// let directive = Directive::parse("money_localize price off as shown").unwrap();
    /// assert!(!directive.localize());
    /// assert_eq!(directive.output_var(), Some("shown"));
    /// ```
    pub fn parse(contents: &str) -> TagResult<Self> {
        let tokens: Vec<&str> = contents.split_whitespace().collect();
        Self::parse_tokens(&tokens)
    }

    /// Parses pre-split tokens. `tokens[0]` is the directive name and is
    /// not inspected.
    ///
    /// The `as <name>` suffix is stripped before the `on`/`off` flag is
    /// looked at, so `money_localize x on as y` localizes and binds `y`.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::WrongArgumentCount`] unless one or two value
    /// tokens remain after option stripping, and
    /// [`TagError::InvalidReference`] for tokens that cannot be compiled.
    pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> TagResult<Self> {
        let mut tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();

        let mut output_var = None;
        if tokens.len() > 3 && tokens[tokens.len() - 2] == "as" {
            output_var = tokens.pop().map(str::to_string);
            tokens.pop();
        }

        let mut localize = true;
        let last = if tokens.len() > 1 {
            tokens.last().copied()
        } else {
            None
        };
        if let Some(flag) = last {
            if flag.eq_ignore_ascii_case("on") {
                tokens.pop();
            } else if flag.eq_ignore_ascii_case("off") {
                localize = false;
                tokens.pop();
            }
        }

        let source = match tokens.as_slice() {
            [_, money] => ValueSource::Single(Expr::compile(money)?),
            [_, amount, currency] => ValueSource::AmountCurrency {
                amount: Expr::compile(amount)?,
                currency: Expr::compile(currency)?,
            },
            _ => return Err(TagError::WrongArgumentCount(tokens.len().saturating_sub(1))),
        };

        Ok(Self::new(source, localize, output_var))
    }

    /// The value source.
    #[must_use]
    pub fn source(&self) -> &ValueSource {
        &self.source
    }

    /// Whether output follows locale conventions.
    #[must_use]
    pub fn localize(&self) -> bool {
        self.localize
    }

    /// Variable to bind instead of producing output.
    #[must_use]
    pub fn output_var(&self) -> Option<&str> {
        self.output_var.as_deref()
    }
}

impl std::str::FromStr for Directive {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
