//! ElementSet - the ordered collection every query resolves into
//!
//! A set is a view of node handles into a [`Dom`]; the chainable methods
//! forward to the operations on `Dom` with the set itself as the query.

use std::ops::Index;
use std::slice;

use dq_css::ComputedStyle;
use dq_dom::{Event, EventListener, NodeId};
use serde_json::Value;

use crate::events::EventArg;
use crate::style::StyleValue;
use crate::{Dom, Query, Result};

/// Ordered collection of nodes, in selection/document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ElementSet {
    nodes: Vec<NodeId>,
}

impl ElementSet {
    /// Empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection seeded with `nodes`, kept as given
    pub fn from_nodes(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        Self { nodes: nodes.into_iter().collect() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::iter::Copied<slice::Iter<'_, NodeId>> {
        self.nodes.iter().copied()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }

    /// `toArray`
    pub fn to_vec(&self) -> Vec<NodeId> {
        self.nodes.clone()
    }

    /// First match of `query` inside any member, tried member by member
    pub fn get<'q>(&self, dom: &Dom, query: impl Into<Query<'q>>) -> Result<Option<ElementSet>> {
        let query = query.into();
        for &member in &self.nodes {
            if let Some(found) = dom.select_one(query.clone(), Some(member))? {
                return Ok(Some(ElementSet::from_nodes([found])));
            }
        }
        Ok(None)
    }

    /// Union of the matches of `query` inside every member, without duplicates
    pub fn get_all<'q>(&self, dom: &Dom, query: impl Into<Query<'q>>) -> Result<ElementSet> {
        let query = query.into();
        let mut all = ElementSet::new();
        for &member in &self.nodes {
            for &found in dom.select_all(query.clone(), Some(member))?.iter() {
                if !all.contains(found) {
                    all.nodes.push(found);
                }
            }
        }
        Ok(all)
    }

    pub fn on<'e>(&self, dom: &mut Dom, event: impl Into<EventArg<'e>>, listener: &EventListener, use_capture: bool) -> Result<&Self> {
        dom.on(event, self, listener, use_capture)?;
        Ok(self)
    }

    pub fn off<'e>(&self, dom: &mut Dom, event: impl Into<EventArg<'e>>, listener: &EventListener, use_capture: bool) -> Result<&Self> {
        dom.off(event, self, listener, use_capture)?;
        Ok(self)
    }

    pub fn trigger<'e>(&self, dom: &Dom, event: impl Into<EventArg<'e>>, data: Option<Value>) -> Result<&Self> {
        dom.trigger(event, self, data)?;
        Ok(self)
    }

    /// Like [`trigger`](Self::trigger), handing back the dispatched event
    pub fn dispatch<'e>(&self, dom: &Dom, event: impl Into<EventArg<'e>>, data: Option<Value>) -> Result<Event> {
        dom.trigger(event, self, data)
    }

    /// Computed style of the first member
    pub fn css(&self, dom: &Dom) -> Result<Option<ComputedStyle>> {
        dom.css(self)
    }

    /// One computed value of the first member
    pub fn css_get(&self, dom: &Dom, property: &str) -> Result<Option<String>> {
        dom.css_get(self, property)
    }

    pub fn css_set(&self, dom: &mut Dom, property: &str, value: impl Into<StyleValue>) -> Result<&Self> {
        dom.css_set(self, property, value)?;
        Ok(self)
    }

    pub fn css_set_all<K, V>(&self, dom: &mut Dom, rules: impl IntoIterator<Item = (K, V)>) -> Result<&Self>
    where
        K: AsRef<str>,
        V: Into<StyleValue>,
    {
        dom.css_set_all(self, rules)?;
        Ok(self)
    }

    /// Insert the members before the node `query` resolves to
    pub fn insert_before<'q>(&self, dom: &mut Dom, query: impl Into<Query<'q>>) -> Result<&Self> {
        dom.insert_before(self, query)?;
        Ok(self)
    }

    /// Insert the members after the node `query` resolves to
    pub fn insert_after<'q>(&self, dom: &mut Dom, query: impl Into<Query<'q>>) -> Result<&Self> {
        dom.insert_after(self, query)?;
        Ok(self)
    }

    /// Insert the members as the first children of the node `query` resolves to
    pub fn prepend<'q>(&self, dom: &mut Dom, query: impl Into<Query<'q>>) -> Result<&Self> {
        dom.prepend(self, query)?;
        Ok(self)
    }

    /// Insert the members as the last children of the node `query` resolves to
    pub fn append<'q>(&self, dom: &mut Dom, query: impl Into<Query<'q>>) -> Result<&Self> {
        dom.append(self, query)?;
        Ok(self)
    }

    /// Detach every member from its parent
    pub fn remove(&self, dom: &mut Dom) -> Result<&Self> {
        dom.remove(self)?;
        Ok(self)
    }
}

impl Index<usize> for ElementSet {
    type Output = NodeId;

    fn index(&self, index: usize) -> &NodeId {
        &self.nodes[index]
    }
}

impl IntoIterator for ElementSet {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ElementSet {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<NodeId> for ElementSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self::from_nodes(iter)
    }
}

impl From<Vec<NodeId>> for ElementSet {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }
}
