//! Style access: computed reads and inline writes

use std::fmt;

use dq_css::{ComputedStyle, computed_style, properties};
use dq_dom::NodeId;

use crate::{Dom, Error, Query, Result};

/// Per-element value callback: `(element, index, all_elements)`
pub type StyleFn = Box<dyn Fn(NodeId, usize, &[NodeId]) -> String>;

/// A style value, fixed or computed per element
pub enum StyleValue {
    Text(String),
    Computed(StyleFn),
}

impl StyleValue {
    /// Value computed from `(element, index, all_elements)`
    pub fn computed(f: impl Fn(NodeId, usize, &[NodeId]) -> String + 'static) -> Self {
        StyleValue::Computed(Box::new(f))
    }

    fn value_for(&self, node: NodeId, index: usize, all: &[NodeId]) -> String {
        match self {
            StyleValue::Text(text) => text.clone(),
            StyleValue::Computed(f) => f(node, index, all),
        }
    }
}

impl fmt::Debug for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            StyleValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<&String> for StyleValue {
    fn from(value: &String) -> Self {
        StyleValue::Text(value.clone())
    }
}

impl Dom {
    /// Computed style of the first node `query` resolves to
    pub fn css<'q>(&self, query: impl Into<Query<'q>>) -> Result<Option<ComputedStyle>> {
        let Some(node) = self.select_one(query, None)? else {
            return Ok(None);
        };
        Ok(computed_style(self.tree(), node))
    }

    /// One computed value of the first node `query` resolves to; `None`
    /// for unsupported properties
    pub fn css_get<'q>(&self, query: impl Into<Query<'q>>, property: &str) -> Result<Option<String>> {
        let Some(name) = self.style_props().resolve(property) else {
            return Ok(None);
        };
        Ok(self.css(query)?.and_then(|style| style.get(name)))
    }

    /// Set one inline property on every node `query` resolves to.
    ///
    /// Unsupported properties are skipped; an empty value removes the
    /// declaration.
    pub fn css_set<'q>(&mut self, query: impl Into<Query<'q>>, property: &str, value: impl Into<StyleValue>) -> Result<()> {
        self.css_set_all(query, [(property, value)])
    }

    /// Set every `(property, value)` rule on every node `query` resolves to
    pub fn css_set_all<'q, K, V>(&mut self, query: impl Into<Query<'q>>, rules: impl IntoIterator<Item = (K, V)>) -> Result<()>
    where
        K: AsRef<str>,
        V: Into<StyleValue>,
    {
        let rules: Vec<(Option<&'static str>, StyleValue)> = rules.into_iter()
            .map(|(property, value)| {
                let property = property.as_ref();
                let name = self.style_props().resolve(property);
                if name.is_none() {
                    tracing::warn!("Unsupported style property {:?} skipped", property);
                }
                (name, value.into())
            })
            .collect();

        let nodes = self.select_all(query, None)?;
        for (index, &node) in nodes.iter().enumerate() {
            let element = self.tree_mut().element_mut(node).ok_or(Error::NotAnElement(node))?;
            for (name, value) in &rules {
                let Some(name) = name else {
                    continue;
                };
                let value = value.value_for(node, index, &nodes);
                // invalid values leave the declaration as it was
                if !value.trim().is_empty() && !properties::accepts(name, &value) {
                    tracing::debug!("Ignoring invalid value {:?} for {}", value, name);
                    continue;
                }
                element.set_style(name, &value);
            }
        }
        Ok(())
    }
}
