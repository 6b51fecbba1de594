//! Error types

use dq_css::SelectorError;
use dq_dom::{DomError, NodeId};

/// Errors raised by dq operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error("No node matches {query}")]
    NotFound { query: String },

    #[error("Node {0:?} has no parent")]
    NoParent(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),
}

/// Result type for dq operations
pub type Result<T> = std::result::Result<T, Error>;
