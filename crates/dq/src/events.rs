//! Event binding, synthesis and dispatch

use std::borrow::Cow;

use dq_dom::events::is_native_event_type;
use dq_dom::{Event, EventListener};
use serde_json::Value;

use crate::{Dom, Query, Result};

/// An event given by type name, or an event object
#[derive(Debug, Clone)]
pub enum EventArg<'a> {
    Type(Cow<'a, str>),
    Event(Event),
}

impl EventArg<'_> {
    pub fn event_type(&self) -> &str {
        match self {
            EventArg::Type(name) => name.as_ref(),
            EventArg::Event(event) => event.event_type(),
        }
    }
}

impl<'a> From<&'a str> for EventArg<'a> {
    fn from(name: &'a str) -> Self {
        EventArg::Type(Cow::Borrowed(name))
    }
}

impl From<String> for EventArg<'_> {
    fn from(name: String) -> Self {
        EventArg::Type(Cow::Owned(name))
    }
}

impl From<Event> for EventArg<'_> {
    fn from(event: Event) -> Self {
        EventArg::Event(event)
    }
}

impl From<&Event> for EventArg<'_> {
    fn from(event: &Event) -> Self {
        EventArg::Event(event.clone())
    }
}

/// `createEvent`: a bubbling, non-cancelable native event when elements
/// expose an `on<type>` handler, otherwise a custom event carrying `data`
/// (an empty object by default).
pub fn create_event(event_type: &str, data: Option<Value>) -> Event {
    if is_native_event_type(event_type) {
        Event::new(event_type, true, false)
    } else {
        Event::custom(event_type, data.unwrap_or_else(|| Value::Object(Default::default())))
    }
}

impl Dom {
    /// Register `listener` for `event` on every node `query` resolves to
    pub fn on<'e, 'q>(
        &mut self,
        event: impl Into<EventArg<'e>>,
        query: impl Into<Query<'q>>,
        listener: &EventListener,
        use_capture: bool,
    ) -> Result<()> {
        let event = event.into();
        let nodes = self.select_all(query, None)?;
        for &node in nodes.iter() {
            self.document_mut().add_event_listener(node, event.event_type(), listener.clone(), use_capture)?;
        }
        tracing::trace!("Bound {} listener on {} nodes", event.event_type(), nodes.len());
        Ok(())
    }

    /// Remove `listener` for `event` from every node `query` resolves to
    pub fn off<'e, 'q>(
        &mut self,
        event: impl Into<EventArg<'e>>,
        query: impl Into<Query<'q>>,
        listener: &EventListener,
        use_capture: bool,
    ) -> Result<()> {
        let event = event.into();
        let nodes = self.select_all(query, None)?;
        for &node in nodes.iter() {
            self.document_mut().remove_event_listener(node, event.event_type(), listener, use_capture)?;
        }
        Ok(())
    }

    /// Dispatch one event instance to every node `query` resolves to, in
    /// order. A type name is turned into an event with [`create_event`].
    ///
    /// Returns the event after the last dispatch. Dispatch borrows the
    /// document shared, so listeners see only the [`Event`] and cannot
    /// mutate the tree; collect what they need and apply it afterwards.
    pub fn trigger<'e, 'q>(
        &self,
        event: impl Into<EventArg<'e>>,
        query: impl Into<Query<'q>>,
        data: Option<Value>,
    ) -> Result<Event> {
        let nodes = self.select_all(query, None)?;
        let mut event = match event.into() {
            EventArg::Type(name) => create_event(&name, data),
            EventArg::Event(event) => event,
        };
        for &node in nodes.iter() {
            self.document().dispatch_event(node, &mut event)?;
        }
        Ok(event)
    }

    /// See [`create_event`]
    pub fn create_event(&self, event_type: &str, data: Option<Value>) -> Event {
        create_event(event_type, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_dom::EventKind;
    use serde_json::json;

    #[test]
    fn test_native_event() {
        let event = create_event("click", Some(json!({"ignored": true})));
        assert_eq!(event.kind(), EventKind::Native);
        assert!(event.bubbles);
        assert!(!event.cancelable);
        assert_eq!(event.detail(), None);
    }

    #[test]
    fn test_custom_event() {
        let event = create_event("my-event", Some(json!({"x": 1})));
        assert_eq!(event.kind(), EventKind::Custom);
        assert!(event.bubbles);
        assert!(event.cancelable);
        assert_eq!(event.detail(), Some(&json!({"x": 1})));

        let empty = create_event("my-event", None);
        assert_eq!(empty.detail(), Some(&json!({})));
    }

    #[test]
    fn test_event_arg_type() {
        let event = Event::new("keyup", true, false);
        assert_eq!(EventArg::from(&event).event_type(), "keyup");
        assert_eq!(EventArg::from("x").event_type(), "x");
    }
}
