//! dq HTML Parser
//!
//! HTML5 parsing built on html5ever, plus innerHTML/outerHTML serialization.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::HtmlSerializer;

use dq_dom::{Document, DomTree, NodeId};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}

/// Parse a body fragment into `tree`, returning its top-level nodes detached
pub fn parse_fragment(html: &str, tree: &mut DomTree) -> Vec<NodeId> {
    HtmlParser::new().parse_fragment(html, tree)
}

/// Serialize a node including itself
pub fn outer_html(tree: &DomTree, node: NodeId) -> String {
    HtmlSerializer::new().serialize_outer(tree, node)
}

/// Serialize a node's children
pub fn inner_html(tree: &DomTree, node: NodeId) -> String {
    HtmlSerializer::new().serialize_inner(tree, node)
}
