//! Render-time context: variables, locale, and viewer location.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::trace;

use moneytag_shared::{Locale, Money};

/// Well-known variable probed for the viewer location.
pub const REQUEST_KEY: &str = "request";

/// Attribute of [`REQUEST_KEY`] holding the location code.
pub const COUNTRY_CODE_KEY: &str = "country_code";

/// A runtime value held in the render environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Value {
    /// Missing or null value.
    #[default]
    None,
    /// Boolean.
    Bool(bool),
    /// Exact decimal number.
    Number(Decimal),
    /// String.
    Str(String),
    /// A money value.
    Money(Money),
    /// Nested attributes, reachable with dotted paths.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns true for [`Value::None`].
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Short name of the variant, for error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Money(_) => "money",
            Self::Map(_) => "map",
        }
    }

    /// Looks up a direct attribute of a map value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Map(map) => map.get(name),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::Money(m) => write!(f, "{m}"),
            Self::Map(map) => write!(f, "{{{} entries}}", map.len()),
        }
    }
}

impl From<Money> for Value {
    fn from(money: Money) -> Self {
        Self::Money(money)
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = String;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        match json {
            serde_json::Value::Null => Ok(Self::None),
            serde_json::Value::Bool(b) => Ok(Self::Bool(b)),
            serde_json::Value::Number(n) => {
                let text = n.to_string();
                Decimal::from_str(&text)
                    .or_else(|_| Decimal::from_scientific(&text))
                    .map(Self::Number)
                    .map_err(|e| format!("number {text} is not a decimal: {e}"))
            }
            serde_json::Value::String(s) => Ok(Self::Str(s)),
            serde_json::Value::Array(_) => Err("arrays are not supported".to_string()),
            serde_json::Value::Object(obj) => obj
                .into_iter()
                .map(|(k, v)| Value::try_from(v).map(|v| (k, v)))
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Self::Map),
        }
    }
}

/// Supplies the current viewer location, if known.
pub trait LocationProvider: Send + Sync {
    /// Location code such as `"US"`; any casing is accepted.
    fn location_code(&self) -> Option<String>;
}

/// A provider that always returns the same location.
#[derive(Debug, Clone)]
pub struct StaticLocation(pub String);

impl LocationProvider for StaticLocation {
    fn location_code(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// The render environment.
#[derive(Default, Clone)]
pub struct Context {
    vars: HashMap<String, Value>,
    locale: Option<Locale>,
    location: Option<Arc<dyn LocationProvider>>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("vars", &self.vars)
            .field("locale", &self.locale)
            .field("location", &self.location.is_some())
            .finish()
    }
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable, builder style.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets the locale used for formatting.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Injects a viewer-location provider.
    #[must_use]
    pub fn with_location_provider(mut self, provider: Arc<dyn LocationProvider>) -> Self {
        self.location = Some(provider);
        self
    }

    /// Injects a fixed viewer location.
    #[must_use]
    pub fn with_location(self, code: impl Into<String>) -> Self {
        self.with_location_provider(Arc::new(StaticLocation(code.into())))
    }

    /// Binds a variable.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Returns a top-level variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Resolves a dotted path through nested maps.
    #[must_use]
    pub fn lookup(&self, path: &[String]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.vars.get(first)?, |value, segment| value.attr(segment))
    }

    /// Locale set on this context, if any.
    #[must_use]
    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    /// Current viewer location.
    ///
    /// Uses the injected provider when present, otherwise reads
    /// `request.country_code`. Empty or missing values give `None`.
    #[must_use]
    pub fn try_location(&self) -> Option<String> {
        let code = match &self.location {
            Some(provider) => provider.location_code(),
            None => match self
                .get(REQUEST_KEY)
                .and_then(|request| request.attr(COUNTRY_CODE_KEY))
            {
                Some(Value::Str(code)) => Some(code.clone()),
                _ => None,
            },
        };

        let code = code.map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        if code.is_none() {
            trace!("No viewer location in render context");
        }
        code
    }
}
