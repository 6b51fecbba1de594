//! Tree mutation: insert before/after, prepend, append, remove

use dq_dom::NodeId;

use crate::{Dom, Error, Query, Result};

impl Dom {
    /// Insert `new_nodes` before the node `query` resolves to, in order
    pub fn insert_before<'n, 'q>(&mut self, new_nodes: impl Into<Query<'n>>, query: impl Into<Query<'q>>) -> Result<()> {
        let anchor = self.anchor(query)?;
        let parent = self.tree().parent(anchor).ok_or(Error::NoParent(anchor))?;
        let nodes = self.select_all(new_nodes, None)?;
        for &node in nodes.iter() {
            self.tree_mut().insert_before(parent, node, Some(anchor))?;
        }
        Ok(())
    }

    /// Insert `new_nodes` after the node `query` resolves to, in order
    pub fn insert_after<'n, 'q>(&mut self, new_nodes: impl Into<Query<'n>>, query: impl Into<Query<'q>>) -> Result<()> {
        let anchor = self.anchor(query)?;
        let parent = self.tree().parent(anchor).ok_or(Error::NoParent(anchor))?;
        let nodes = self.select_all(new_nodes, None)?;
        // reversed: each insertion lands directly after the anchor
        for &node in nodes.iter().rev() {
            let next = self.tree().next_sibling(anchor);
            self.tree_mut().insert_before(parent, node, next)?;
        }
        Ok(())
    }

    /// Insert `new_nodes` as the first children of the node `query` resolves to
    pub fn prepend<'n, 'q>(&mut self, new_nodes: impl Into<Query<'n>>, query: impl Into<Query<'q>>) -> Result<()> {
        let parent = self.anchor(query)?;
        let nodes = self.select_all(new_nodes, None)?;
        for &node in nodes.iter().rev() {
            let first = self.tree().first_child(parent);
            self.tree_mut().insert_before(parent, node, first)?;
        }
        Ok(())
    }

    /// Insert `new_nodes` as the last children of the node `query` resolves to
    pub fn append<'n, 'q>(&mut self, new_nodes: impl Into<Query<'n>>, query: impl Into<Query<'q>>) -> Result<()> {
        let parent = self.anchor(query)?;
        let nodes = self.select_all(new_nodes, None)?;
        for &node in nodes.iter() {
            self.tree_mut().append_child(parent, node)?;
        }
        Ok(())
    }

    /// Detach every node `query` resolves to from its parent
    pub fn remove<'q>(&mut self, query: impl Into<Query<'q>>) -> Result<()> {
        let nodes = self.select_all(query, None)?;
        for &node in nodes.iter() {
            let parent = self.tree().parent(node).ok_or(Error::NoParent(node))?;
            self.tree_mut().remove_child(parent, node)?;
        }
        tracing::trace!("Removed {} nodes", nodes.len());
        Ok(())
    }

    /// The single node a mutation is relative to
    fn anchor<'q>(&self, query: impl Into<Query<'q>>) -> Result<NodeId> {
        let query = query.into();
        let description = query.to_string();
        self.select_one(query, None)?
            .ok_or(Error::NotFound { query: description })
    }
}
