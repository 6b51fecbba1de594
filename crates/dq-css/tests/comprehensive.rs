//! Comprehensive tests for dq-css
//!
//! Selector queries and style resolution against hand-built trees.

use dq_css::{Color, ElementQuery, SelectorError, StyleProps, computed_style, parse_selector};
use dq_dom::{DomTree, NodeId};

/// <html lang="en-US"><body><form><input id="name" required><input id="agree" type="checkbox" checked disabled></form>
/// <article data-kind="news post"><h1>T</h1><p>a</p><p>b</p></article></body></html>
fn page() -> (DomTree, Vec<NodeId>) {
    fn el(tree: &mut DomTree, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = tree.create_element(tag);
        for &(name, value) in attrs {
            tree.element_mut(id).unwrap().set_attr(name, value);
        }
        tree.append_child(parent, id).unwrap();
        id
    }

    let mut tree = DomTree::new();
    let root = tree.root();
    let html = el(&mut tree, root, "html", &[("lang", "en-US")]);
    let body = el(&mut tree, html, "body", &[]);
    let form = el(&mut tree, body, "form", &[]);
    let name = el(&mut tree, form, "input", &[("id", "name"), ("required", "")]);
    let agree = el(&mut tree, form, "input", &[("id", "agree"), ("type", "checkbox"), ("checked", ""), ("disabled", "")]);
    let article = el(&mut tree, body, "article", &[("data-kind", "news post")]);
    let h1 = el(&mut tree, article, "h1", &[]);
    let p1 = el(&mut tree, article, "p", &[]);
    let p2 = el(&mut tree, article, "p", &[]);
    (tree, vec![html, body, form, name, agree, article, h1, p1, p2])
}

#[test]
fn test_form_pseudo_classes() {
    let (tree, ids) = page();
    let root = tree.root();
    assert_eq!(tree.query_selector_all(root, "input:required").unwrap(), vec![ids[3]]);
    assert_eq!(tree.query_selector_all(root, "input:optional").unwrap(), vec![ids[4]]);
    assert_eq!(tree.query_selector_all(root, ":checked").unwrap(), vec![ids[4]]);
    assert_eq!(tree.query_selector_all(root, "input:enabled").unwrap(), vec![ids[3]]);
    assert_eq!(tree.query_selector_all(root, ":disabled").unwrap(), vec![ids[4]]);
}

#[test]
fn test_attribute_operators() {
    let (tree, ids) = page();
    let root = tree.root();
    assert_eq!(tree.query_selector(root, "[data-kind~=post]").unwrap(), Some(ids[5]));
    assert_eq!(tree.query_selector(root, "[data-kind*='ws p']").unwrap(), Some(ids[5]));
    assert_eq!(tree.query_selector(root, "[data-kind$=POST i]").unwrap(), Some(ids[5]));
    assert_eq!(tree.query_selector(root, "[data-kind$=POST]").unwrap(), None);
    assert_eq!(tree.query_selector(root, "[type=checkbox][checked]").unwrap(), Some(ids[4]));
}

#[test]
fn test_type_and_lang() {
    let (tree, ids) = page();
    let root = tree.root();
    assert_eq!(tree.query_selector_all(root, "p:first-of-type").unwrap(), vec![ids[7]]);
    assert_eq!(tree.query_selector_all(root, "article > :nth-child(2n+1)").unwrap(), vec![ids[6], ids[8]]);
    assert_eq!(tree.query_selector_all(root, "h1 ~ p:last-of-type").unwrap(), vec![ids[8]]);
    assert_eq!(tree.query_selector_all(root, "p:lang(en)").unwrap().len(), 2);
    assert!(tree.query_selector_all(root, "p:lang(fr)").unwrap().is_empty());
}

#[test]
fn test_nth_child_extreme_offset() {
    let (tree, ids) = page();
    let root = tree.root();
    assert_eq!(tree.query_selector_all(root, "p:nth-child(n-2147483648)").unwrap(), vec![ids[7], ids[8]]);
    assert_eq!(tree.query_selector_all(root, "p:nth-last-child(-n+2147483647)").unwrap().len(), 2);
    assert!(tree.query_selector_all(root, "p:nth-of-type(-2147483648n+2147483647)").unwrap().is_empty());
}

#[test]
fn test_is_where_has() {
    let (tree, ids) = page();
    let root = tree.root();
    assert_eq!(tree.query_selector_all(root, ":is(form, article) > :first-child").unwrap(), vec![ids[3], ids[6]]);
    assert_eq!(tree.query_selector_all(root, "body > :where(article)").unwrap(), vec![ids[5]]);
    assert_eq!(tree.query_selector_all(root, "body > :has(> h1)").unwrap(), vec![ids[5]]);
    assert_eq!(tree.query_selector_all(root, "h1:has(+ p)").unwrap(), vec![ids[6]]);
}

#[test]
fn test_interactive_and_pseudo_elements_never_match() {
    let (tree, _) = page();
    let root = tree.root();
    assert!(tree.query_selector_all(root, "input:focus, p:hover").unwrap().is_empty());
    assert!(tree.query_selector_all(root, "p::before").unwrap().is_empty());
}

#[test]
fn test_closest_and_matches() {
    let (tree, ids) = page();
    assert_eq!(tree.closest(ids[7], "body > *").unwrap(), Some(ids[5]));
    assert_eq!(tree.closest(ids[7], "p").unwrap(), Some(ids[7]));
    assert!(tree.matches(ids[0], ":root").unwrap());
    assert!(!tree.matches(ids[1], ":root").unwrap());
}

#[test]
fn test_selector_errors() {
    assert_eq!(parse_selector(""), Err(SelectorError::Empty));
    let err = parse_selector("p:nope").unwrap_err();
    assert!(err.to_string().starts_with("'p:nope' is not a valid selector"));
}

#[test]
fn test_style_props_and_computed() {
    let (mut tree, ids) = page();
    let props = StyleProps::new();
    let name = props.resolve("text-fill-color").unwrap();
    assert_eq!(name, "WebkitTextFillColor");

    tree.element_mut(ids[5]).unwrap().set_style("color", "rgb(10, 20, 30)");
    let style = computed_style(&tree, ids[7]).unwrap();
    assert_eq!(style.get(name).as_deref(), Some("rgb(10, 20, 30)"));
    assert_eq!(style.get_property_value("-webkit-text-fill-color"), "rgb(10, 20, 30)");
}

#[test]
fn test_color_values() {
    assert_eq!(Color::parse("teal"), Some(Color::rgb(0, 128, 128)));
    assert_eq!(Color::parse("rgba(0, 0, 0, 0)"), Some(Color::TRANSPARENT));
    assert_eq!(Color::WHITE.to_string(), "rgb(255, 255, 255)");
}
