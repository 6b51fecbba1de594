//! dq CSS - Selectors & Style
//!
//! Selector parsing/matching behind `querySelector`, `querySelectorAll` and
//! `matches`, plus the style side of the host: the supported property table,
//! vendor-prefixed name resolution and computed style.

mod parser;
pub mod selectors;
mod query;
pub mod properties;
mod style_props;
pub mod color;
mod computed;

pub use parser::parse_selector;
pub use selectors::SelectorList;
pub use query::ElementQuery;
pub use style_props::{StyleProps, DEFAULT_VENDOR_PREFIXES};
pub use color::Color;
pub use computed::{ComputedStyle, computed_style};

/// Selector syntax error, the equivalent of a `SyntaxError` DOMException
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("The selector is empty")]
    Empty,

    #[error("'{selector}' is not a valid selector: {reason}")]
    Invalid { selector: String, reason: String },
}
