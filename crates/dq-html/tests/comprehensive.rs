//! Parser and serializer integration tests

use dq_html::{HtmlParser, inner_html, outer_html, parse, parse_fragment};

#[test]
fn test_document_structure() {
    let doc = parse("<!DOCTYPE html><title>T</title><p id=x>hi</p>");
    assert!(doc.document_element().is_valid());
    assert!(doc.head().is_valid());
    assert_eq!(doc.title(), "T");
    let p = doc.get_element_by_id("x").unwrap();
    assert_eq!(doc.tree().parent(p), Some(doc.body()));
}

#[test]
fn test_doctype_serialized() {
    let doc = parse("<!DOCTYPE html><html><head></head><body></body></html>");
    let html = outer_html(doc.tree(), doc.tree().root());
    assert_eq!(html, "<!DOCTYPE html><html><head></head><body></body></html>");
}

#[test]
fn test_url_kept() {
    let doc = HtmlParser::new().parse_with_url("<p></p>", "https://example.com/");
    assert_eq!(doc.url(), "https://example.com/");
}

#[test]
fn test_fragment_round_trip() {
    let mut doc = parse("<body></body>");
    let nodes = parse_fragment("<div><span/></div>", doc.tree_mut());
    assert_eq!(nodes.len(), 1);
    assert_eq!(outer_html(doc.tree(), nodes[0]), "<div><span></span></div>");

    let body = doc.body();
    doc.tree_mut().append_child(body, nodes[0]).unwrap();
    assert_eq!(inner_html(doc.tree(), body), "<div><span></span></div>");
}

#[test]
fn test_fragment_mixed_content() {
    let mut doc = parse("");
    let nodes = parse_fragment("<b>1</b> and <i>2</i>", doc.tree_mut());
    assert_eq!(nodes.len(), 3);
    assert!(doc.tree().get(nodes[1]).unwrap().is_text());
}

#[test]
fn test_fragment_table_parts_need_context() {
    // a bare <td> has no table context in body and is dropped by the tree builder
    let mut doc = parse("");
    let nodes = parse_fragment("<td>x</td>", doc.tree_mut());
    assert!(nodes.iter().all(|&n| !doc.tree().get(n).unwrap().is_element()));
}

#[test]
fn test_template_contents_flattened() {
    let doc = parse("<template id=t><p>in</p></template>");
    let t = doc.get_element_by_id("t").unwrap();
    assert_eq!(inner_html(doc.tree(), t), "<p>in</p>");
}
