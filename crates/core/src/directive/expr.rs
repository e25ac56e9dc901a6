//! Compiled directive tokens.

use std::str::FromStr;

use rust_decimal::Decimal;

use moneytag_shared::{TagError, TagResult};

use crate::context::{Context, Value};

/// One directive token, compiled at parse time and resolved at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A quoted string or a decimal literal.
    Literal(Value),
    /// A variable reference; dots separate attribute lookups.
    Variable(Vec<String>),
}

impl Expr {
    /// Compiles a raw token.
    ///
    /// `'4.5'` and `"USD"` are string literals, `4.5` is a number literal,
    /// anything else is a variable path.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::InvalidReference`] for empty tokens or paths with
    /// empty segments (`a..b`, `.a`).
    pub fn compile(token: &str) -> TagResult<Self> {
        if let Some(inner) = unquote(token) {
            return Ok(Self::Literal(Value::Str(inner.to_string())));
        }

        if token.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.') {
            if let Ok(n) = Decimal::from_str(token) {
                return Ok(Self::Literal(Value::Number(n)));
            }
        }

        let segments: Vec<String> = token.split('.').map(str::to_string).collect();
        if token.is_empty() || segments.iter().any(String::is_empty) {
            return Err(TagError::InvalidReference(token.to_string()));
        }
        Ok(Self::Variable(segments))
    }

    /// Evaluates against the context. Unknown variables resolve to
    /// [`Value::None`].
    #[must_use]
    pub fn resolve(&self, ctx: &Context) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Variable(path) => ctx.lookup(path).cloned().unwrap_or_default(),
        }
    }

    /// Source-like rendering for messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Literal(Value::Str(s)) => format!("'{s}'"),
            Self::Literal(value) => value.to_string(),
            Self::Variable(path) => path.join("."),
        }
    }
}

fn unquote(token: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|q| {
        token
            .strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
    })
}
