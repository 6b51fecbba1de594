//! HTML Serialization (innerHTML/outerHTML)

use dq_dom::{DomTree, ElementData, NodeData, NodeId};

/// Elements that never get an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are written unescaped
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Markup writer for a subtree
#[derive(Debug, Clone)]
pub struct HtmlSerializer {
    /// Put element children on their own indented lines
    pub pretty_print: bool,
    /// One level of indentation
    pub indent: String,
}

impl Default for HtmlSerializer {
    fn default() -> Self {
        Self { pretty_print: false, indent: "  ".into() }
    }
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty_print: true, ..Self::default() }
    }

    /// `innerHTML`: the children of `node`
    pub fn serialize_inner(&self, tree: &DomTree, node: NodeId) -> String {
        let mut out = String::new();
        self.write_children(tree, node, 0, &mut out);
        out
    }

    /// `outerHTML`: `node` and its subtree
    pub fn serialize_outer(&self, tree: &DomTree, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(tree, node, 0, &mut out);
        out
    }

    fn write_node(&self, tree: &DomTree, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = tree.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Document => self.write_children(tree, id, depth, out),
            NodeData::Doctype { name, .. } => {
                out.push_str("<!DOCTYPE ");
                out.push_str(name);
                out.push('>');
            }
            NodeData::Element(element) => self.write_element(tree, id, element, depth, out),
            NodeData::Text(text) => escape(&text.content, false, out),
            NodeData::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment);
                out.push_str("-->");
            }
        }
    }

    fn write_element(&self, tree: &DomTree, id: NodeId, element: &ElementData, depth: usize, out: &mut String) {
        let tag = element.local_name();
        if self.pretty_print && depth > 0 {
            self.break_line(depth, out);
        }

        out.push('<');
        out.push_str(tag);
        for attr in &element.attrs {
            out.push(' ');
            out.push_str(&attr.name);
            out.push_str("=\"");
            escape(&attr.value, true, out);
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&tag) {
            return;
        }

        if RAW_TEXT_ELEMENTS.contains(&tag) {
            tree.children(id)
                .filter_map(|(_, child)| child.as_text())
                .for_each(|text| out.push_str(text));
        } else {
            self.write_children(tree, id, depth + 1, out);
            if self.pretty_print && tree.element_children(id).next().is_some() {
                self.break_line(depth, out);
            }
        }

        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }

    fn write_children(&self, tree: &DomTree, parent: NodeId, depth: usize, out: &mut String) {
        for (child, _) in tree.children(parent) {
            self.write_node(tree, child, depth, out);
        }
    }

    fn break_line(&self, depth: usize, out: &mut String) {
        out.push('\n');
        out.push_str(&self.indent.repeat(depth));
    }
}

/// Escape text content, or an attribute value when `in_attribute` is set
fn escape(text: &str, in_attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `<div title='say "hi"'>a < b & c<br></div>`
    fn sample() -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let text = tree.create_text("a < b & c");
        let br = tree.create_element("br");
        tree.element_mut(div).unwrap().set_attr("title", "say \"hi\"");
        tree.append_child(div, text).unwrap();
        tree.append_child(div, br).unwrap();
        (tree, div)
    }

    #[test]
    fn test_outer_and_inner() {
        let (tree, div) = sample();
        let serializer = HtmlSerializer::new();
        assert_eq!(
            serializer.serialize_outer(&tree, div),
            r#"<div title="say &quot;hi&quot;">a &lt; b &amp; c<br></div>"#
        );
        assert_eq!(serializer.serialize_inner(&tree, div), "a &lt; b &amp; c<br>");
    }

    #[test]
    fn test_comment_and_raw_text() {
        let mut tree = DomTree::new();
        let style = tree.create_element("style");
        let css = tree.create_text("a > b { color: red }");
        let note = tree.create_comment(" note ");
        tree.append_child(style, css).unwrap();
        tree.append_child(style, note).unwrap();
        // only text children are written inside raw text elements
        assert_eq!(
            HtmlSerializer::new().serialize_outer(&tree, style),
            "<style>a > b { color: red }</style>"
        );
        assert_eq!(HtmlSerializer::new().serialize_outer(&tree, note), "<!-- note -->");
    }

    #[test]
    fn test_pretty() {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul");
        let li = tree.create_element("li");
        tree.append_child(ul, li).unwrap();
        assert_eq!(HtmlSerializer::pretty().serialize_outer(&tree, ul), "<ul>\n  <li></li>\n</ul>");
    }
}
