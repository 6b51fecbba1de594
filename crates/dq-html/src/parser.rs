//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to our arena DOM.

use dq_dom::{Document, DomTree, ElementData, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::{QualName, local_name, ns, parse_document};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    /// Keep text nodes that are entirely whitespace
    keep_whitespace: bool,
}

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep or drop whitespace-only text nodes
    pub fn keep_whitespace(mut self, keep: bool) -> Self {
        self.keep_whitespace = keep;
        self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_rcdom(html);

        let mut document = Document::empty(url);
        let root = document.tree().root();
        for child in dom.document.children.borrow().iter() {
            self.convert_node(child, document.tree_mut(), Some(root));
        }

        // Find html, head, body elements
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Parse `html` the way `body.innerHTML` does and import the resulting
    /// top-level nodes into `tree`, detached and in order.
    pub fn parse_fragment(&self, html: &str, tree: &mut DomTree) -> Vec<NodeId> {
        let context = QualName::new(None, ns!(html), local_name!("body"));
        let dom = html5ever::parse_fragment(RcDom::default(), Default::default(), context, Vec::new(), false)
            .one(html);

        // The fragment parser roots its output in a synthetic <html> element
        let Some(root) = find_child(&dom.document, "html") else {
            return Vec::new();
        };

        let nodes: Vec<NodeId> = root.children.borrow().iter()
            .filter_map(|child| self.convert_node(child, tree, None))
            .collect();

        tracing::debug!("Parsed fragment into {} top-level nodes", nodes.len());
        nodes
    }

    /// Convert an RcDom node, appending it to `parent` when given
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: Option<NodeId>) -> Option<NodeId> {
        let id = match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
                return None;
            }
            RcNodeData::Doctype { name, public_id, system_id } => {
                tree.create_doctype(name, public_id, system_id)
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if !self.keep_whitespace && text.trim().is_empty() {
                    return None;
                }
                tree.create_text(&text)
            }
            RcNodeData::Comment { contents } => tree.create_comment(contents),
            RcNodeData::Element { name, attrs, template_contents, .. } => {
                let mut elem = ElementData::new(name.local.as_ref());
                for attr in attrs.borrow().iter() {
                    elem.set_attr(attr.name.local.as_ref(), attr.value.to_string());
                }
                let id = tree.create_element_with(elem);

                // Template contents live in their own fragment; flatten them under the element
                if let Some(contents) = template_contents.borrow().as_ref() {
                    for child in contents.children.borrow().iter() {
                        self.convert_node(child, tree, Some(id));
                    }
                }
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, Some(id));
                }
                id
            }
            RcNodeData::ProcessingInstruction { .. } => return None,
        };

        if let Some(parent) = parent {
            if let Err(err) = tree.append_child(parent, id) {
                tracing::warn!("Dropping parsed node {:?}: {}", id, err);
                return None;
            }
        }
        Some(id)
    }
}

fn parse_rcdom(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

fn find_child(handle: &Handle, tag: &str) -> Option<Handle> {
    handle.children.borrow().iter()
        .find(|child| matches!(&child.data, RcNodeData::Element { name, .. } if name.local.as_ref() == tag))
        .cloned()
}
