//! Dom - the host document plus the operations over it

use dq_css::{ElementQuery, StyleProps};
use dq_dom::{Document, DomTree, NodeId};
use dq_html::HtmlParser;

use crate::{Config, ElementSet, Query, Result};

/// A document together with the style-name resolver its operations share
#[derive(Debug)]
pub struct Dom {
    document: Document,
    style_props: StyleProps,
    config: Config,
}

impl Dom {
    /// Empty `<html><head></head><body></body></html>` document
    pub fn new(config: Config) -> Self {
        tracing::debug!("Creating document at {}", config.url);
        Self {
            document: Document::new(&config.url),
            style_props: StyleProps::with_prefixes(config.vendor_prefixes.iter().cloned()),
            config,
        }
    }

    /// Parse a whole document with the default configuration
    pub fn from_html(html: &str) -> Self {
        Self::from_html_with(html, Config::default())
    }

    /// Parse a whole document
    pub fn from_html_with(html: &str, config: Config) -> Self {
        let document = HtmlParser::new()
            .keep_whitespace(config.keep_whitespace_text)
            .parse_with_url(html, &config.url);
        Self {
            document,
            style_props: StyleProps::with_prefixes(config.vendor_prefixes.iter().cloned()),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn tree(&self) -> &DomTree {
        self.document.tree()
    }

    pub(crate) fn tree_mut(&mut self) -> &mut DomTree {
        self.document.tree_mut()
    }

    pub fn style_props(&self) -> &StyleProps {
        &self.style_props
    }

    /// Serialized markup of a node including itself
    pub fn outer_html(&self, node: NodeId) -> String {
        dq_html::outer_html(self.tree(), node)
    }

    /// Serialized markup of a node's children
    pub fn inner_html(&self, node: NodeId) -> String {
        dq_html::inner_html(self.tree(), node)
    }

    /// Resolve `query` into a collection. A string starting with `<` is
    /// parsed as an HTML fragment instead of matched as a selector.
    pub fn create<'q>(&mut self, query: impl Into<Query<'q>>) -> Result<ElementSet> {
        self.create_in(query, None)
    }

    /// [`create`](Self::create) with selectors matched under `context`
    pub fn create_in<'q>(&mut self, query: impl Into<Query<'q>>, context: Option<NodeId>) -> Result<ElementSet> {
        let query = query.into();
        if let Query::Selector(markup) = &query {
            if markup.starts_with('<') {
                return Ok(self.parse(markup).unwrap_or_default());
            }
        }
        Ok(ElementSet::from_nodes(self.select_all(query, context)?.iter().copied()))
    }

    /// `get`: the first node `query` resolves to
    pub fn get<'q>(&self, query: impl Into<Query<'q>>, context: Option<NodeId>) -> Result<Option<NodeId>> {
        self.select_one(query, context)
    }

    /// `getAll`: every node `query` resolves to
    pub fn get_all<'q>(&self, query: impl Into<Query<'q>>, context: Option<NodeId>) -> Result<Vec<NodeId>> {
        Ok(self.select_all(query, context)?.into_owned())
    }

    /// Whether `element` matches a selector, or is the node the query names
    pub fn is<'q>(&self, element: NodeId, query: impl Into<Query<'q>>) -> Result<bool> {
        match query.into() {
            Query::Selector(selector) => Ok(self.tree().matches(element, &selector)?),
            Query::Node(node) => Ok(node == element),
            Query::Nodes(nodes) => Ok(nodes == [element]),
        }
    }

    /// Parse an HTML fragment into detached nodes of this document.
    ///
    /// Returns the fragment's top-level elements, or `None` when it has none.
    pub fn parse(&mut self, html: &str) -> Option<ElementSet> {
        let parser = HtmlParser::new().keep_whitespace(self.config.keep_whitespace_text);
        let nodes = parser.parse_fragment(html, self.document.tree_mut());
        let tree = self.document.tree();
        let elements: ElementSet = nodes.into_iter()
            .filter(|&node| tree.element(node).is_some())
            .collect();
        tracing::debug!("Parsed fragment into {} elements", elements.len());
        (!elements.is_empty()).then_some(elements)
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
