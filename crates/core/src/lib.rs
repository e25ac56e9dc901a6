//! Money formatting directive with location-based currency symbol overrides.
//!
//! # Modules
//!
//! - `directive` - Parse `money_localize` directives into structured requests
//! - `context` - Render-time variables, locale, and viewer location
//! - `resolver` - Resolve money values, format them, apply overrides, or bind
//! - `overrides` - Location override table and its process-wide cache
//!
//! # Example
//!
//! ```
//! use moneytag_core::{Context, Directive, MoneyResolver};
//!
//! let directive = Directive::parse("money_localize '4.5' 'USD'").unwrap();
//! let mut ctx = Context::new();
//! let out = MoneyResolver::default().render(&directive, &mut ctx).unwrap();
//! assert_eq!(out, "$4.50");
//! ```

pub mod context;
pub mod directive;
pub mod overrides;
pub mod resolver;

pub use context::{Context, LocationProvider, StaticLocation, Value};
pub use directive::{Directive, Expr, ValueSource};
pub use overrides::{LocationOverrideTable, OverrideCache, OverrideSource, SymbolOverride};
pub use resolver::MoneyResolver;
