//! Element Query and Methods
//!
//! querySelector, querySelectorAll, matches and closest over a `DomTree`.

use dq_dom::{DomTree, NodeData, NodeId};

use crate::SelectorError;
use crate::parser::parse_selector;
use crate::selectors::{MatchContext, parent_element};

/// Element query trait
pub trait ElementQuery {
    /// First element under `scope` matching `selector`, in document order
    fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;

    /// All elements under `scope` matching `selector`, in document order
    fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError>;

    /// Find closest inclusive ancestor matching selector
    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError>;
}

impl ElementQuery for DomTree {
    fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = parse_selector(selector)?;
        let ctx = scope_context(self, scope);
        Ok(self.descendants(scope).find(|&node| list.matches(self, node, ctx)))
    }

    fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        let list = parse_selector(selector)?;
        let ctx = scope_context(self, scope);
        let found: Vec<NodeId> = self.descendants(scope)
            .filter(|&node| list.matches(self, node, ctx))
            .collect();
        tracing::trace!("querySelectorAll({:?}) matched {} elements", selector, found.len());
        Ok(found)
    }

    fn matches(&self, element: NodeId, selector: &str) -> Result<bool, SelectorError> {
        let list = parse_selector(selector)?;
        Ok(list.matches(self, element, MatchContext { scope: Some(element) }))
    }

    fn closest(&self, element: NodeId, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        let list = parse_selector(selector)?;
        let ctx = MatchContext { scope: Some(element) };
        let mut current = self.element(element).map(|_| element);
        while let Some(node) = current {
            if list.matches(self, node, ctx) {
                return Ok(Some(node));
            }
            current = parent_element(self, node);
        }
        Ok(None)
    }
}

/// `:scope` is the context element, or the root element for a document
fn scope_context(tree: &DomTree, scope: NodeId) -> MatchContext {
    let is_document = tree.get(scope).is_some_and(|n| matches!(n.data, NodeData::Document));
    if is_document {
        MatchContext { scope: tree.element_children(scope).next() }
    } else {
        MatchContext { scope: Some(scope) }
    }
}
