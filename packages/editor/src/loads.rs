//! Ordering of asynchronous image loads
//!
//! A load is started with [`ImageLoads::begin`] and its completion arrives
//! later as a discrete event. Several loads for the same node may overlap;
//! [`LoadOrder`] decides which completions are applied.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOrder {
    /// Apply every completion as it arrives; the last one to finish wins
    #[default]
    LastCompleted,

    /// Discard a completion when a later-started load (or a direct edit)
    /// for the same node has already been applied
    LastStarted,
}

/// Handle for one in-flight load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    node_id: NodeId,
    generation: u64,
    sequence: u64,
}

impl LoadTicket {
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct ImageLoads {
    order: LoadOrder,
    next_sequence: u64,

    /// Sequence of the newest write applied per node
    applied: HashMap<NodeId, u64>,
}

impl ImageLoads {
    pub fn new(order: LoadOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    pub fn order(&self) -> LoadOrder {
        self.order
    }

    pub fn begin(&mut self, node_id: NodeId, generation: u64) -> LoadTicket {
        LoadTicket {
            node_id,
            generation,
            sequence: self.next(),
        }
    }

    /// Record an edit that did not go through a load
    pub fn record_direct(&mut self, node_id: NodeId) {
        let sequence = self.next();
        self.applied.insert(node_id, sequence);
    }

    /// Decide whether a completed load should be applied, recording it if so
    pub fn accept(&mut self, ticket: &LoadTicket, generation: u64) -> bool {
        if ticket.generation != generation {
            return false;
        }

        if self.order == LoadOrder::LastStarted {
            let newest = self.applied.get(&ticket.node_id).copied();
            if newest.is_some_and(|newest| newest > ticket.sequence) {
                return false;
            }
        }

        self.applied.insert(ticket.node_id.clone(), ticket.sequence);
        true
    }

    /// Forget everything about the previous parse generation
    pub fn reset(&mut self) {
        self.applied.clear();
    }

    fn next(&mut self) -> u64 {
        self.next_sequence += 1;
        self.next_sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_completed_applies_everything() {
        let mut loads = ImageLoads::new(LoadOrder::LastCompleted);
        let first = loads.begin("img".into(), 1);
        let second = loads.begin("img".into(), 1);

        assert!(loads.accept(&second, 1));
        assert!(loads.accept(&first, 1));
    }

    #[test]
    fn test_last_started_discards_superseded() {
        let mut loads = ImageLoads::new(LoadOrder::LastStarted);
        let first = loads.begin("img".into(), 1);
        let second = loads.begin("img".into(), 1);

        assert!(loads.accept(&second, 1));
        assert!(!loads.accept(&first, 1));
    }

    #[test]
    fn test_last_started_in_order_completions() {
        let mut loads = ImageLoads::new(LoadOrder::LastStarted);
        let first = loads.begin("img".into(), 1);
        let second = loads.begin("img".into(), 1);

        assert!(loads.accept(&first, 1));
        assert!(loads.accept(&second, 1));
    }

    #[test]
    fn test_direct_edit_supersedes_older_load() {
        let mut loads = ImageLoads::new(LoadOrder::LastStarted);
        let pending = loads.begin("img".into(), 1);
        loads.record_direct("img".into());

        assert!(!loads.accept(&pending, 1));
    }

    #[test]
    fn test_other_nodes_independent() {
        let mut loads = ImageLoads::new(LoadOrder::LastStarted);
        let a = loads.begin("a".into(), 1);
        let b = loads.begin("b".into(), 1);

        assert!(loads.accept(&b, 1));
        assert!(loads.accept(&a, 1));
    }

    #[test]
    fn test_stale_generation_rejected() {
        let mut loads = ImageLoads::new(LoadOrder::LastCompleted);
        let ticket = loads.begin("img".into(), 1);
        loads.reset();

        assert!(!loads.accept(&ticket, 2));
    }
}
