//! DOM Node
//!
//! Nodes link to each other through `NodeId`s into the arena rather than
//! pointers, so a node can be detached and re-inserted without reallocation.

use crate::NodeId;
use crate::style::InlineStyle;

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn unlinked(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(name: &str) -> Self {
        Self::unlinked(NodeData::Element(ElementData::new(name)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::unlinked(NodeData::Text(TextData { content: content.into() }))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::unlinked(NodeData::Comment(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::unlinked(NodeData::Document)
    }

    /// Create a node carrying a copy of `data`, with no links
    pub(crate) fn detached_copy(&self) -> Self {
        Self::unlinked(self.data.clone())
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Whether this node may hold children
    #[inline]
    pub fn is_container(&self) -> bool {
        matches!(self.data, NodeData::Element(_) | NodeData::Document)
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercased local name
    pub name: String,
    /// Attributes in source order
    pub attrs: Vec<Attribute>,
    /// Parsed `style` attribute, kept in sync with it
    style: InlineStyle,
}

impl ElementData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
            style: InlineStyle::new(),
        }
    }

    /// Tag name as written in selectors (lowercase)
    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Check attribute presence
    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        if name == "style" {
            self.style = InlineStyle::parse(&value);
        }
        // Check if attribute already exists
        for attr in self.attrs.iter_mut() {
            if attr.name == name {
                attr.value = value;
                return;
            }
        }
        self.attrs.push(Attribute { name, value });
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|a| a.name.eq_ignore_ascii_case(name))?;
        let attr = self.attrs.remove(pos);
        if attr.name == "style" {
            self.style = InlineStyle::new();
        }
        Some(attr.value)
    }

    /// `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Whitespace-separated `class` tokens
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attr("class").unwrap_or("").split_whitespace()
    }

    /// Check for a class token
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Inline style declarations
    pub fn style(&self) -> &InlineStyle {
        &self.style
    }

    /// Set one inline declaration by camelCase name. An empty value removes it.
    ///
    /// The `style` attribute is re-serialized so selectors and serialization
    /// observe the change. Returns `false`, leaving both untouched, when
    /// `value` is not a single declaration value.
    pub fn set_style(&mut self, property: &str, value: &str) -> bool {
        if !self.style.set(property, value) {
            return false;
        }
        let css_text = self.style.to_css_text();
        if css_text.is_empty() {
            self.attrs.retain(|a| a.name != "style");
            return true;
        }
        match self.attrs.iter_mut().find(|a| a.name == "style") {
            Some(attr) => attr.value = css_text,
            None => self.attrs.push(Attribute { name: "style".into(), value: css_text }),
        }
        true
    }
}

/// Text node data
#[derive(Debug, Clone)]
pub struct TextData {
    pub content: String,
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_set_and_replace() {
        let mut elem = ElementData::new("DIV");
        assert_eq!(elem.local_name(), "div");

        elem.set_attr("ID", "main");
        elem.set_attr("id", "other");
        assert_eq!(elem.attrs.len(), 1);
        assert_eq!(elem.id(), Some("other"));
    }

    #[test]
    fn test_classes() {
        let mut elem = ElementData::new("p");
        elem.set_attr("class", "  intro   lead ");
        assert_eq!(elem.classes().collect::<Vec<_>>(), vec!["intro", "lead"]);
        assert!(elem.has_class("lead"));
        assert!(!elem.has_class("in"));
    }

    #[test]
    fn test_style_attr_sync() {
        let mut elem = ElementData::new("div");
        elem.set_attr("style", "color: red; margin-top: 4px");
        assert_eq!(elem.style().get("marginTop"), Some("4px"));

        elem.set_style("backgroundColor", "blue");
        assert_eq!(
            elem.get_attr("style"),
            Some("color: red; margin-top: 4px; background-color: blue;")
        );

        elem.set_style("color", "");
        elem.set_style("marginTop", "");
        elem.set_style("backgroundColor", "");
        assert!(!elem.has_attr("style"));
    }

    #[test]
    fn test_set_style_rejected_keeps_attr() {
        let mut elem = ElementData::new("div");
        elem.set_attr("style", "width: 1px");
        assert!(!elem.set_style("width", "10px; color: blue"));
        assert_eq!(elem.get_attr("style"), Some("width: 1px"));
        assert_eq!(elem.style().get("color"), None);
    }
}
