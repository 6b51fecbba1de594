//! dq DOM - Document Object Model
//!
//! Arena-backed DOM tree with the primitives the `dq` façade delegates to:
//! tree mutation, inline style declarations and event dispatch.

mod node;
mod tree;
mod document;
mod operations;
pub mod style;
pub mod events;

pub use node::{Node, NodeData, ElementData, TextData, Attribute};
pub use tree::{DomTree, Children, Descendants};
pub use document::Document;
pub use operations::{DomError, DomResult};
pub use style::InlineStyle;
pub use events::{Event, EventKind, EventPhase, EventListener};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this ID refers to a node rather than the sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Index into the arena
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Turn the sentinel into `None`
    #[inline]
    pub fn some(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}
