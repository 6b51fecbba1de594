//! DOM Events
//!
//! Event objects, listener registration and capture/target/bubble dispatch.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::NodeId;

/// Standard handler names an `HTMLElement` exposes as `on<type>`
pub const GLOBAL_EVENT_HANDLERS: &[&str] = &[
    "abort", "animationend", "animationiteration", "animationstart", "auxclick",
    "beforeinput", "blur", "cancel", "canplay", "canplaythrough", "change", "click",
    "close", "contextmenu", "copy", "cut", "dblclick", "drag", "dragend", "dragenter",
    "dragleave", "dragover", "dragstart", "drop", "durationchange", "emptied", "ended",
    "error", "focus", "focusin", "focusout", "formdata", "input", "invalid", "keydown",
    "keypress", "keyup", "load", "loadeddata", "loadedmetadata", "loadstart",
    "mousedown", "mouseenter", "mouseleave", "mousemove", "mouseout", "mouseover",
    "mouseup", "paste", "pause", "play", "playing", "pointercancel", "pointerdown",
    "pointerenter", "pointerleave", "pointermove", "pointerout", "pointerover",
    "pointerup", "progress", "ratechange", "reset", "resize", "scroll", "scrollend",
    "seeked", "seeking", "select", "stalled", "submit", "suspend", "timeupdate",
    "toggle", "touchcancel", "touchend", "touchmove", "touchstart", "transitionend",
    "volumechange", "waiting", "wheel",
];

/// Whether elements carry a native `on<type>` handler for this event type
pub fn is_native_event_type(event_type: &str) -> bool {
    GLOBAL_EVENT_HANDLERS.contains(&event_type)
}

/// Native (`HTMLEvents`) or custom (`CustomEvent`) event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Native,
    Custom,
}

/// Dispatch phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    #[default]
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    event_type: String,
    kind: EventKind,
    pub bubbles: bool,
    pub cancelable: bool,
    detail: Option<Value>,
    target: Option<NodeId>,
    current_target: Option<NodeId>,
    phase: EventPhase,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl Event {
    /// Create a native event (`createEvent('HTMLEvents')` + `initEvent`)
    pub fn new(event_type: impl Into<String>, bubbles: bool, cancelable: bool) -> Self {
        Self {
            event_type: event_type.into(),
            kind: EventKind::Native,
            bubbles,
            cancelable,
            detail: None,
            target: None,
            current_target: None,
            phase: EventPhase::None,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    /// Create a bubbling, cancelable custom event carrying `detail`
    pub fn custom(event_type: impl Into<String>, detail: Value) -> Self {
        Self {
            kind: EventKind::Custom,
            detail: Some(detail),
            ..Self::new(event_type, true, true)
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Payload of a custom event
    pub fn detail(&self) -> Option<&Value> {
        self.detail.as_ref()
    }

    /// Node the event was dispatched to
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Node whose listeners are currently running
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    /// Prevent default action (cancelable events only)
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop after the listeners of the current node
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop before the next listener
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub(crate) fn begin(&mut self, target: NodeId) {
        self.target = Some(target);
        self.propagation_stopped = false;
        self.immediate_propagation_stopped = false;
    }

    pub(crate) fn enter(&mut self, node: NodeId, phase: EventPhase) {
        self.current_target = Some(node);
        self.phase = phase;
    }

    pub(crate) fn finish(&mut self) {
        self.current_target = None;
        self.phase = EventPhase::None;
        self.propagation_stopped = false;
        self.immediate_propagation_stopped = false;
    }

    pub(crate) fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) fn immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped
    }
}

/// Listener callback. Identity (for removal) is the shared allocation.
///
/// Listeners receive only the event; the tree is borrowed for the whole
/// dispatch, so DOM changes have to wait until it returns.
#[derive(Clone)]
pub struct EventListener(Rc<dyn Fn(&mut Event)>);

impl EventListener {
    pub fn new(callback: impl Fn(&mut Event) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    /// Invoke the callback
    pub fn call(&self, event: &mut Event) {
        (self.0)(event)
    }
}

impl PartialEq for EventListener {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for EventListener {}

impl fmt::Debug for EventListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventListener({:p})", Rc::as_ptr(&self.0))
    }
}

#[derive(Debug, Clone)]
struct Registration {
    event_type: String,
    listener: EventListener,
    capture: bool,
}

/// Listeners by target node
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    by_node: HashMap<NodeId, Vec<Registration>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register; returns false when the same (type, listener, capture) is already present
    pub fn add(&mut self, node: NodeId, event_type: &str, listener: EventListener, capture: bool) -> bool {
        let entries = self.by_node.entry(node).or_default();
        let duplicate = entries.iter().any(|r| {
            r.event_type == event_type && r.capture == capture && r.listener == listener
        });
        if duplicate {
            return false;
        }
        entries.push(Registration {
            event_type: event_type.to_string(),
            listener,
            capture,
        });
        true
    }

    /// Deregister; returns whether anything was removed
    pub fn remove(&mut self, node: NodeId, event_type: &str, listener: &EventListener, capture: bool) -> bool {
        let Some(entries) = self.by_node.get_mut(&node) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|r| {
            !(r.event_type == event_type && r.capture == capture && r.listener == *listener)
        });
        let removed = entries.len() != before;
        if entries.is_empty() {
            self.by_node.remove(&node);
        }
        removed
    }

    /// Snapshot of listeners on `node` for `event_type`; `capture` filters by flag
    pub fn listeners(&self, node: NodeId, event_type: &str, capture: Option<bool>) -> Vec<EventListener> {
        self.by_node.get(&node)
            .map(|entries| {
                entries.iter()
                    .filter(|r| r.event_type == event_type)
                    .filter(|r| capture.is_none_or(|c| r.capture == c))
                    .map(|r| r.listener.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of listeners on `node` for `event_type`
    pub fn count(&self, node: NodeId, event_type: &str) -> usize {
        self.by_node.get(&node)
            .map_or(0, |entries| entries.iter().filter(|r| r.event_type == event_type).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_native_vs_custom() {
        let click = Event::new("click", true, false);
        assert_eq!(click.kind(), EventKind::Native);
        assert!(click.detail().is_none());

        let custom = Event::custom("saved", json!({"id": 3}));
        assert_eq!(custom.kind(), EventKind::Custom);
        assert!(custom.bubbles && custom.cancelable);
        assert_eq!(custom.detail(), Some(&json!({"id": 3})));
    }

    #[test]
    fn test_prevent_default_requires_cancelable() {
        let mut event = Event::new("click", true, false);
        event.prevent_default();
        assert!(!event.is_default_prevented());

        let mut event = Event::new("submit", true, true);
        event.prevent_default();
        assert!(event.is_default_prevented());
    }

    #[test]
    fn test_registry_dedup_and_remove() {
        let mut registry = ListenerRegistry::new();
        let node = NodeId(1);
        let listener = EventListener::new(|_| {});
        let other = EventListener::new(|_| {});

        assert!(registry.add(node, "click", listener.clone(), false));
        assert!(!registry.add(node, "click", listener.clone(), false));
        assert!(registry.add(node, "click", listener.clone(), true));
        assert!(registry.add(node, "click", other.clone(), false));
        assert_eq!(registry.count(node, "click"), 3);
        assert_eq!(registry.listeners(node, "click", Some(true)).len(), 1);

        assert!(registry.remove(node, "click", &listener, false));
        assert!(!registry.remove(node, "click", &listener, false));
        assert_eq!(registry.count(node, "click"), 2);
    }

    #[test]
    fn test_native_table() {
        assert!(is_native_event_type("click"));
        assert!(is_native_event_type("keydown"));
        assert!(!is_native_event_type("custom-name"));
    }
}
