//! DOM Node Operations
//!
//! Error type shared by appendChild, removeChild and insertBefore.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("Hierarchy request error: {child:?} cannot be inserted into {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    /// Invalid node type
    #[error("Invalid node type for {0:?}")]
    InvalidNodeType(NodeId),
    /// Node is not a child
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}
