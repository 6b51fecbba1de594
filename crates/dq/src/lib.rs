//! dq
//!
//! A small DOM convenience layer: wrap elements picked by selector, node or
//! parsed HTML in an ordered [`ElementSet`] and work on them with chainable
//! helpers for events, styles and tree mutation.
//!
//! # Example
//! ```rust,ignore
//! use dq::{Dom, EventListener};
//!
//! let mut dom = Dom::from_html("<ul><li>one</li></ul>");
//! let items = dom.create("<li>two</li><li>three</li>")?;
//! items.append(&mut dom, "ul")?.css_set(&mut dom, "color", "red")?;
//!
//! let log = EventListener::new(|event| println!("{:?}", event.detail()));
//! dom.on("item-added", "li", &log, false)?;
//! dom.trigger("item-added", &items, Some(serde_json::json!({"count": 2})))?;
//! ```

mod config;
mod error;
mod query;
mod set;
mod dom;
mod events;
mod style;
mod mutation;

pub use config::Config;
pub use error::{Error, Result};
pub use query::Query;
pub use set::ElementSet;
pub use dom::Dom;
pub use events::{EventArg, create_event};
pub use style::{StyleFn, StyleValue};

pub use dq_css::{ComputedStyle, StyleProps};
pub use dq_dom::{Document, DomTree, Event, EventKind, EventListener, EventPhase, NodeId};

// Re-export sub-crates for advanced usage
pub use dq_css as css;
pub use dq_dom as dom_tree;
pub use dq_html as html;
