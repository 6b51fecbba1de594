//! Style-name resolution
//!
//! Maps a hyphenated (or camelCase) property name to the name the style
//! interface actually exposes, falling back to vendor-prefixed variants.
//! Prefixed lookups are memoized for the lifetime of the resolver.

use std::cell::RefCell;
use std::collections::HashMap;

use dq_dom::style::camel_case;

use crate::properties;

/// Prefixes tried, in order, when the unprefixed name is unsupported
pub const DEFAULT_VENDOR_PREFIXES: [&str; 4] = ["Moz", "Webkit", "O", "ms"];

/// Lazily filled property-name cache
#[derive(Debug)]
pub struct StyleProps {
    prefixes: Vec<String>,
    resolved: RefCell<HashMap<String, Option<&'static str>>>,
}

impl StyleProps {
    pub fn new() -> Self {
        Self::with_prefixes(DEFAULT_VENDOR_PREFIXES)
    }

    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            resolved: RefCell::new(HashMap::new()),
        }
    }

    /// Resolve `property` to a supported style name, or `None` if unsupported
    pub fn resolve(&self, property: &str) -> Option<&'static str> {
        let camel = camel_case(property.trim());

        if let Some(name) = properties::canonical(&camel) {
            return Some(name);
        }

        if let Some(&cached) = self.resolved.borrow().get(&camel) {
            return cached;
        }

        let capitalized = capitalize(&camel);
        let found = self.prefixes.iter()
            .find_map(|prefix| properties::canonical(&format!("{}{}", prefix, capitalized)));

        tracing::trace!("Resolved style property {:?} to {:?}", camel, found);
        self.resolved.borrow_mut().insert(camel, found);
        found
    }

    /// Number of memoized prefixed lookups
    pub fn cached(&self) -> usize {
        self.resolved.borrow().len()
    }
}

impl Default for StyleProps {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
