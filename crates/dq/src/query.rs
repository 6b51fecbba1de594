//! Queries and the selection resolvers
//!
//! Every public operation accepts a [`Query`]: a selector string, a node, a
//! sequence of nodes or an [`ElementSet`]. The resolvers normalize it into a
//! node list or a single node.

use std::borrow::Cow;
use std::fmt;

use dq_css::ElementQuery;
use dq_dom::NodeId;

use crate::{Dom, ElementSet, Result};

/// Anything an operation can resolve to nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query<'a> {
    /// CSS selector, evaluated against a context (default: the document)
    Selector(Cow<'a, str>),
    /// A node already resolved by the caller
    Node(NodeId),
    /// An ordered sequence of nodes, used as-is
    Nodes(&'a [NodeId]),
}

impl fmt::Display for Query<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Selector(selector) => write!(f, "'{}'", selector),
            Query::Node(node) => write!(f, "{:?}", node),
            Query::Nodes(nodes) => write!(f, "{:?}", nodes),
        }
    }
}

impl<'a> From<&'a str> for Query<'a> {
    fn from(selector: &'a str) -> Self {
        Query::Selector(Cow::Borrowed(selector))
    }
}

impl From<String> for Query<'_> {
    fn from(selector: String) -> Self {
        Query::Selector(Cow::Owned(selector))
    }
}

impl<'a> From<&'a String> for Query<'a> {
    fn from(selector: &'a String) -> Self {
        Query::Selector(Cow::Borrowed(selector))
    }
}

impl From<NodeId> for Query<'_> {
    fn from(node: NodeId) -> Self {
        Query::Node(node)
    }
}

impl<'a> From<&'a [NodeId]> for Query<'a> {
    fn from(nodes: &'a [NodeId]) -> Self {
        Query::Nodes(nodes)
    }
}

impl<'a, const N: usize> From<&'a [NodeId; N]> for Query<'a> {
    fn from(nodes: &'a [NodeId; N]) -> Self {
        Query::Nodes(nodes)
    }
}

impl<'a> From<&'a Vec<NodeId>> for Query<'a> {
    fn from(nodes: &'a Vec<NodeId>) -> Self {
        Query::Nodes(nodes)
    }
}

impl<'a> From<&'a ElementSet> for Query<'a> {
    fn from(set: &'a ElementSet) -> Self {
        Query::Nodes(set.as_slice())
    }
}

impl Dom {
    /// `selectAll`: resolve `query` to nodes in order.
    ///
    /// Sequences come back borrowed and unchanged; selectors are matched
    /// under `context`, or the whole document when it is `None`.
    pub fn select_all<'q>(&self, query: impl Into<Query<'q>>, context: Option<NodeId>) -> Result<Cow<'q, [NodeId]>> {
        match query.into() {
            Query::Selector(selector) => {
                let scope = context.unwrap_or_else(|| self.tree().root());
                let found = self.tree().query_selector_all(scope, &selector)?;
                Ok(Cow::Owned(found))
            }
            Query::Node(node) => Ok(Cow::Owned(vec![node])),
            Query::Nodes(nodes) => Ok(Cow::Borrowed(nodes)),
        }
    }

    /// `selectOne`: the first match of a selector, the first member of a
    /// sequence, or the node itself.
    pub fn select_one<'q>(&self, query: impl Into<Query<'q>>, context: Option<NodeId>) -> Result<Option<NodeId>> {
        match query.into() {
            Query::Selector(selector) => {
                let scope = context.unwrap_or_else(|| self.tree().root());
                Ok(self.tree().query_selector(scope, &selector)?)
            }
            Query::Node(node) => Ok(Some(node)),
            Query::Nodes(nodes) => Ok(nodes.first().copied()),
        }
    }
}
