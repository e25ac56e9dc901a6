//! Error taxonomy for directive parsing and money rendering.

use thiserror::Error;

/// Result type alias using `TagError`.
pub type TagResult<T> = Result<T, TagError>;

/// Broad classification of a [`TagError`].
///
/// Syntax errors abort compilation of a directive, type errors abort a
/// single render, configuration errors come from a broken override file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The directive shape is invalid.
    Syntax,
    /// A resolved value has the wrong shape.
    Type,
    /// The override configuration could not be loaded.
    Configuration,
}

/// Errors raised while parsing or rendering a money directive.
#[derive(Debug, Error)]
pub enum TagError {
    /// Too many or too few positional arguments after option stripping.
    #[error("Wrong number of input data to the tag: expected 1 or 2 values, got {0}")]
    WrongArgumentCount(usize),

    /// A token could not be compiled into a value reference.
    #[error("Invalid variable reference: {0:?}")]
    InvalidReference(String),

    /// Neither a money value nor an amount and currency pair was available.
    #[error("You must define both variables: amount and currency.")]
    MissingAmountAndCurrency,

    /// The single value reference did not resolve to a money value.
    #[error("The variable \"{0}\" must be an instance of Money.")]
    NotMoney(String),

    /// The amount operand could not be coerced to a decimal.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The currency operand could not be coerced to a currency code.
    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    /// Exactly one half of the amount and currency pair resolved.
    #[error("Missing {0}: both amount and currency must resolve to a value")]
    MissingOperand(&'static str),

    /// The override configuration exists but could not be loaded.
    #[error("Currency override configuration error: {0}")]
    Config(String),
}

impl TagError {
    /// Returns the broad class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::WrongArgumentCount(_)
            | Self::InvalidReference(_)
            | Self::MissingAmountAndCurrency => ErrorKind::Syntax,
            Self::NotMoney(_)
            | Self::InvalidAmount(_)
            | Self::InvalidCurrency(_)
            | Self::MissingOperand(_) => ErrorKind::Type,
            Self::Config(_) => ErrorKind::Configuration,
        }
    }

    /// Returns a stable error code for host-side reporting.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::WrongArgumentCount(_) => "WRONG_ARGUMENT_COUNT",
            Self::InvalidReference(_) => "INVALID_REFERENCE",
            Self::MissingAmountAndCurrency => "MISSING_AMOUNT_AND_CURRENCY",
            Self::NotMoney(_) => "NOT_MONEY",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidCurrency(_) => "INVALID_CURRENCY",
            Self::MissingOperand(_) => "MISSING_OPERAND",
            Self::Config(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Returns true for errors raised by a malformed directive.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self.kind(), ErrorKind::Syntax)
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(TagError::WrongArgumentCount(4).kind(), ErrorKind::Syntax);
        assert_eq!(
            TagError::InvalidReference("a..b".into()).kind(),
            ErrorKind::Syntax
        );
        assert_eq!(TagError::MissingAmountAndCurrency.kind(), ErrorKind::Syntax);
        assert_eq!(TagError::NotMoney("price".into()).kind(), ErrorKind::Type);
        assert_eq!(TagError::InvalidAmount("abc".into()).kind(), ErrorKind::Type);
        assert_eq!(TagError::InvalidCurrency("US".into()).kind(), ErrorKind::Type);
        assert_eq!(TagError::MissingOperand("amount").kind(), ErrorKind::Type);
        assert_eq!(
            TagError::config("bad file").kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            TagError::WrongArgumentCount(0).error_code(),
            "WRONG_ARGUMENT_COUNT"
        );
        assert_eq!(
            TagError::MissingAmountAndCurrency.error_code(),
            "MISSING_AMOUNT_AND_CURRENCY"
        );
        assert_eq!(TagError::NotMoney(String::new()).error_code(), "NOT_MONEY");
        assert_eq!(
            TagError::Config(String::new()).error_code(),
            "CONFIGURATION_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            TagError::NotMoney("price".into()).to_string(),
            "The variable \"price\" must be an instance of Money."
        );
        assert_eq!(
            TagError::MissingAmountAndCurrency.to_string(),
            "You must define both variables: amount and currency."
        );
        assert_eq!(
            TagError::WrongArgumentCount(3).to_string(),
            "Wrong number of input data to the tag: expected 1 or 2 values, got 3"
        );
    }

    #[test]
    fn test_is_syntax() {
        assert!(TagError::WrongArgumentCount(3).is_syntax());
        assert!(!TagError::NotMoney("x".into()).is_syntax());
    }
}
