//! Document - High-level document API

use crate::events::{Event, EventListener, EventPhase, ListenerRegistry};
use crate::{DomResult, DomTree, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Registered event listeners
    listeners: ListenerRegistry,
}

impl Document {
    /// Create a new document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        // Freshly created nodes cannot violate the hierarchy
        let root = tree.root();
        for (parent, child) in [(root, html), (html, head), (html, body)] {
            let linked = tree.append_child(parent, child);
            debug_assert!(linked.is_ok(), "skeleton link failed: {:?}", linked);
        }

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
            listeners: ListenerRegistry::new(),
        }
    }

    /// Locate html/head/body after the tree was built externally
    pub fn finalize(&mut self) {
        self.html_element = self.tree.element_children(self.tree.root())
            .find(|&id| self.is_tag(id, "html"))
            .unwrap_or(NodeId::NONE);
        if !self.html_element.is_valid() {
            return;
        }
        self.head_element = self.tree.element_children(self.html_element)
            .find(|&id| self.is_tag(id, "head"))
            .unwrap_or(NodeId::NONE);
        self.body_element = self.tree.element_children(self.html_element)
            .find(|&id| self.is_tag(id, "body"))
            .unwrap_or(NodeId::NONE);
    }

    fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.tree.element(id).is_some_and(|e| e.local_name() == tag)
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree.element_children(self.head_element)
            .find(|&id| self.is_tag(id, "title"))
            .map(|id| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID (first in document order)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root())
            .find(|&node| self.tree.element(node).and_then(|e| e.id()) == Some(id))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// `addEventListener`
    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: EventListener,
        capture: bool,
    ) -> DomResult<()> {
        self.tree.get(node).ok_or(crate::DomError::NotFound(node))?;
        if !self.listeners.add(node, event_type, listener, capture) {
            tracing::trace!("Duplicate {} listener on {:?} ignored", event_type, node);
        }
        Ok(())
    }

    /// `removeEventListener`
    pub fn remove_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: &EventListener,
        capture: bool,
    ) -> DomResult<()> {
        self.tree.get(node).ok_or(crate::DomError::NotFound(node))?;
        self.listeners.remove(node, event_type, listener, capture);
        Ok(())
    }

    /// Number of listeners registered on a node for a type
    pub fn listener_count(&self, node: NodeId, event_type: &str) -> usize {
        self.listeners.count(node, event_type)
    }

    /// `dispatchEvent`: run capture, target and bubble phases synchronously.
    ///
    /// Returns `false` if a listener prevented the default action.
    pub fn dispatch_event(&self, target: NodeId, event: &mut Event) -> DomResult<bool> {
        self.tree.get(target).ok_or(crate::DomError::NotFound(target))?;

        // Ancestors, nearest first
        let mut path = Vec::new();
        let mut current = self.tree.parent(target);
        while let Some(node) = current {
            path.push(node);
            current = self.tree.parent(node);
        }

        tracing::trace!(
            "Dispatching {} to {:?} through {} ancestors",
            event.event_type(),
            target,
            path.len()
        );

        event.begin(target);

        'dispatch: {
            for &node in path.iter().rev() {
                self.invoke(node, EventPhase::Capturing, Some(true), event);
                if event.propagation_stopped() {
                    break 'dispatch;
                }
            }

            self.invoke(target, EventPhase::AtTarget, Some(true), event);
            if !event.immediate_propagation_stopped() {
                self.invoke(target, EventPhase::AtTarget, Some(false), event);
            }
            if event.propagation_stopped() || !event.bubbles {
                break 'dispatch;
            }

            for &node in &path {
                self.invoke(node, EventPhase::Bubbling, Some(false), event);
                if event.propagation_stopped() {
                    break 'dispatch;
                }
            }
        }

        event.finish();
        Ok(!event.is_default_prevented())
    }

    /// Run the listeners of one node matching the capture filter
    fn invoke(&self, node: NodeId, phase: EventPhase, capture: Option<bool>, event: &mut Event) {
        let listeners = self.listeners.listeners(node, event.event_type(), capture);
        if listeners.is_empty() {
            return;
        }
        event.enter(node, phase);
        for listener in listeners {
            listener.call(event);
            if event.immediate_propagation_stopped() {
                break;
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn nested() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new("about:blank");
        let outer = doc.tree.create_element("div");
        let inner = doc.tree.create_element("span");
        let body = doc.body();
        doc.tree.append_child(body, outer).unwrap();
        doc.tree.append_child(outer, inner).unwrap();
        (doc, outer, inner)
    }

    fn recorder(log: &Rc<RefCell<Vec<String>>>, label: &'static str) -> EventListener {
        let log = Rc::clone(log);
        EventListener::new(move |e: &mut Event| {
            log.borrow_mut().push(format!("{}:{:?}", label, e.phase()));
        })
    }

    #[test]
    fn test_skeleton() {
        let doc = Document::default();
        assert!(doc.document_element().is_valid());
        assert_eq!(doc.tree.parent(doc.document_element()), Some(doc.tree.root()));
        assert_eq!(doc.tree.parent(doc.body()), Some(doc.document_element()));
        let sections: Vec<NodeId> = doc.tree.element_children(doc.document_element()).collect();
        assert_eq!(sections, [doc.head(), doc.body()]);
        assert_eq!(doc.title(), "");
    }

    #[test]
    fn test_capture_target_bubble_order() {
        let (mut doc, outer, inner) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));
        doc.add_event_listener(outer, "click", recorder(&log, "outer-bubble"), false).unwrap();
        doc.add_event_listener(outer, "click", recorder(&log, "outer-capture"), true).unwrap();
        doc.add_event_listener(inner, "click", recorder(&log, "inner"), false).unwrap();

        let mut event = Event::new("click", true, false);
        assert!(doc.dispatch_event(inner, &mut event).unwrap());
        assert_eq!(
            *log.borrow(),
            vec!["outer-capture:Capturing", "inner:AtTarget", "outer-bubble:Bubbling"]
        );
        assert_eq!(event.target(), Some(inner));
        assert_eq!(event.current_target(), None);
    }

    #[test]
    fn test_non_bubbling_event() {
        let (mut doc, outer, inner) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));
        doc.add_event_listener(outer, "focus", recorder(&log, "outer"), false).unwrap();

        let mut event = Event::new("focus", false, false);
        doc.dispatch_event(inner, &mut event).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_stop_propagation() {
        let (mut doc, outer, inner) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));
        doc.add_event_listener(inner, "click", EventListener::new(|e| e.stop_propagation()), false).unwrap();
        doc.add_event_listener(inner, "click", recorder(&log, "inner-second"), false).unwrap();
        doc.add_event_listener(outer, "click", recorder(&log, "outer"), false).unwrap();

        let mut event = Event::new("click", true, false);
        doc.dispatch_event(inner, &mut event).unwrap();
        assert_eq!(*log.borrow(), vec!["inner-second:AtTarget"]);
    }

    #[test]
    fn test_stop_immediate_propagation() {
        let (mut doc, _outer, inner) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));
        doc.add_event_listener(inner, "click", EventListener::new(|e| e.stop_immediate_propagation()), false).unwrap();
        doc.add_event_listener(inner, "click", recorder(&log, "never"), false).unwrap();

        let mut event = Event::new("click", true, false);
        doc.dispatch_event(inner, &mut event).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_prevent_default_result() {
        let (mut doc, outer, inner) = nested();
        doc.add_event_listener(outer, "save", EventListener::new(|e| e.prevent_default()), false).unwrap();

        let mut event = Event::custom("save", serde_json::json!({}));
        assert!(!doc.dispatch_event(inner, &mut event).unwrap());
    }
}
