//! Declarative kind compatibility.
//!
//! A [`CompatibilityTable`] maps an ordered `(source kind, target kind)` pair
//! to allowed or denied. Pairs that were never listed are denied, so adding a
//! new kind never opens connections by accident.

use crate::kind::NodeKind;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct CompatibilityTable {
    rules: HashMap<(NodeKind, NodeKind), bool>,
}

impl CompatibilityTable {
    /// Empty table: every connection is denied.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in rule: only emitters may connect to receivers.
    pub fn emitter_to_receiver() -> Self {
        Self::new().allow(NodeKind::emitter(), NodeKind::receiver())
    }

    /// Allow edges from `source` kind nodes to `target` kind nodes.
    pub fn allow(mut self, source: impl Into<NodeKind>, target: impl Into<NodeKind>) -> Self {
        self.set(source.into(), target.into(), true);
        self
    }

    /// Explicitly deny a pair. Mostly useful to override an earlier `allow`.
    pub fn deny(mut self, source: impl Into<NodeKind>, target: impl Into<NodeKind>) -> Self {
        self.set(source.into(), target.into(), false);
        self
    }

    pub fn set(&mut self, source: NodeKind, target: NodeKind, allowed: bool) {
        self.rules.insert((source, target), allowed);
    }

    /// Direction matters: `is_allowed(a, b)` says nothing about `(b, a)`.
    pub fn is_allowed(&self, source: &NodeKind, target: &NodeKind) -> bool {
        self.rules
            .get(&(source.clone(), target.clone()))
            .copied()
            .unwrap_or(false)
    }

    /// All allowed pairs, sorted for stable output.
    pub fn allowed_pairs(&self) -> Vec<(&NodeKind, &NodeKind)> {
        let mut pairs: Vec<_> = self
            .rules
            .iter()
            .filter(|(_, allowed)| **allowed)
            .map(|((s, t), _)| (s, t))
            .collect();
        pairs.sort();
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
