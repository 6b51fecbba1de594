//! End-to-end behavior of the dq operations

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dq::{Dom, ElementSet, Error, Event, EventListener, EventPhase, NodeId};
use serde_json::{Value, json};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn counter() -> (Rc<Cell<usize>>, EventListener) {
    let count = Rc::new(Cell::new(0));
    let seen = count.clone();
    (count, EventListener::new(move |_| seen.set(seen.get() + 1)))
}

const PAGE: &str = r#"
<div id="app">
  <ul class="menu"><li class="item">one</li><li class="item active">two</li></ul>
  <ul class="menu"><li class="item">three</li></ul>
</div>
"#;

#[test]
fn test_get_all_document_order_without_duplicates() {
    init_tracing();
    let dom = Dom::from_html(PAGE);
    let all = dom.get_all(".item, .active, li", None).unwrap();
    assert_eq!(all.len(), 3);
    let texts: Vec<String> = all.iter().map(|&n| dom.tree().text_content(n)).collect();
    assert_eq!(texts, ["one", "two", "three"]);
}

#[test]
fn test_get_absent() {
    let dom = Dom::from_html(PAGE);
    assert_eq!(dom.get(".missing", None).unwrap(), None);

    let mut dom = dom;
    let set = dom.create("#app").unwrap();
    assert!(set.get(&dom, "table").unwrap().is_none());
}

#[test]
fn test_fragment_round_trip() {
    let mut dom = Dom::default();
    let fragment = dom.create("<div><span/></div>").unwrap();
    assert_eq!(fragment.len(), 1);
    fragment.append(&mut dom, "body").unwrap();
    assert_eq!(dom.get_all("div span", None).unwrap().len(), 1);
}

#[test]
fn test_insert_after_preserves_order() {
    let mut dom = Dom::from_html(r#"<p id="anchor"></p><p id="tail"></p>"#);
    let anchor = dom.get("#anchor", None).unwrap().unwrap();
    let new = dom.create(r#"<i id="a"></i><i id="b"></i>"#).unwrap();
    let (a, b) = (new[0], new[1]);

    dom.insert_after(&new, anchor).unwrap();

    let tree = dom.tree();
    assert_eq!(tree.next_sibling(anchor), Some(a));
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.next_sibling(b), dom.get("#tail", None).unwrap());
}

#[test]
fn test_css_background_color() {
    let mut dom = Dom::from_html(PAGE);
    let el = dom.get("#app", None).unwrap().unwrap();
    dom.css_set(el, "background-color", "red").unwrap();
    assert_eq!(dom.css_get(el, "background-color").unwrap().as_deref(), Some("rgb(255, 0, 0)"));
}

#[test]
fn test_click_once_per_dispatch_then_off() {
    let mut dom = Dom::from_html(PAGE);
    let el = dom.get(".active", None).unwrap().unwrap();
    let (count, listener) = counter();

    dom.on("click", el, &listener, false).unwrap();
    dom.trigger("click", el, None).unwrap();
    assert_eq!(count.get(), 1);
    dom.trigger("click", el, None).unwrap();
    assert_eq!(count.get(), 2);

    dom.off("click", el, &listener, false).unwrap();
    dom.trigger("click", el, None).unwrap();
    assert_eq!(count.get(), 2);
}

#[test]
fn test_custom_event_detail() {
    let mut dom = Dom::from_html(PAGE);
    let el = dom.get("#app", None).unwrap().unwrap();
    let received: Rc<RefCell<Option<Value>>> = Rc::default();
    let sink = received.clone();
    let listener = EventListener::new(move |event: &mut Event| {
        *sink.borrow_mut() = event.detail().cloned();
    });

    dom.on("custom-name", el, &listener, false).unwrap();
    dom.trigger("custom-name", el, Some(json!({"x": 1}))).unwrap();
    assert_eq!(*received.borrow(), Some(json!({"x": 1})));
}

#[test]
fn test_trigger_same_instance_to_every_node() {
    let mut dom = Dom::from_html(PAGE);
    let items = dom.create(".item").unwrap();
    let targets: Rc<RefCell<Vec<NodeId>>> = Rc::default();
    let sink = targets.clone();
    let listener = EventListener::new(move |event: &mut Event| {
        sink.borrow_mut().push(event.target().unwrap_or(NodeId::NONE));
        event.prevent_default();
    });

    items.on(&mut dom, "ping", &listener, false).unwrap();
    let event = items.dispatch(&dom, "ping", None).unwrap();

    assert_eq!(*targets.borrow(), items.to_vec());
    // custom events are cancelable; the flag sticks across dispatches
    assert!(event.is_default_prevented());
    assert_eq!(event.phase(), EventPhase::None);
}

#[test]
fn test_bubbling_to_ancestor() {
    let mut dom = Dom::from_html(PAGE);
    let (count, listener) = counter();
    dom.on("click", "#app", &listener, false).unwrap();
    dom.trigger("click", ".item", None).unwrap();
    assert_eq!(count.get(), 3);
}

#[test]
fn test_on_with_event_object() {
    let mut dom = Dom::from_html(PAGE);
    let (count, listener) = counter();
    let template = dom.create_event("focus", None);
    dom.on(&template, ".active", &listener, false).unwrap();
    dom.trigger(template, ".active", None).unwrap();
    assert_eq!(count.get(), 1);
}

#[test]
fn test_chaining() -> Result<(), Error> {
    let mut dom = Dom::from_html(PAGE);
    let (count, listener) = counter();
    let items = dom.create("<li>four</li><li>five</li>").unwrap();

    items
        .append(&mut dom, "ul.menu")?
        .css_set(&mut dom, "color", "green")?
        .on(&mut dom, "click", &listener, false)?
        .trigger(&dom, "click", None)?;

    assert_eq!(count.get(), 2);
    assert_eq!(dom.get_all(".menu li", None).unwrap().len(), 5);
    assert_eq!(items.css_get(&dom, "color")?.as_deref(), Some("rgb(0, 128, 0)"));
    Ok(())
}

#[test]
fn test_remove_collection() {
    let mut dom = Dom::from_html(PAGE);
    let items = dom.create(".item").unwrap();
    items.remove(&mut dom).unwrap();
    assert!(dom.get_all("li", None).unwrap().is_empty());

    // the removed nodes stay usable
    items.prepend(&mut dom, "ul").unwrap();
    assert_eq!(dom.get_all("li", None).unwrap().len(), 3);
}

#[test]
fn test_from_nodes_keeps_members() {
    let dom = Dom::from_html(PAGE);
    let items = dom.get_all(".item", None).unwrap();
    let set = ElementSet::from_nodes(items.iter().rev().copied());
    assert_eq!(set.first(), items.last().copied());
    assert_eq!(set.len(), 3);
}
