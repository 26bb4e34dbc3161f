//! Grid clusters and clusterhead election

pub mod partition;
pub mod election;
pub mod metrics;

pub use election::elect_clusterhead;
pub use metrics::ClusterStats;
pub use partition::GridPartitioner;

use crate::graph::{NodeId, NodeTable};
use serde::{Deserialize, Serialize};

/// One square cell of the grid and the nodes placed in it
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Sequential identifier, x-major over the grid
    pub id: u32,

    /// Lower-left corner of the cell
    pub x: f64,
    pub y: f64,

    /// Side length of the cell
    pub size: f64,

    /// Member slots in the node table, in insertion order
    members: Vec<usize>,

    /// Slot of the elected clusterhead
    clusterhead: Option<usize>,
}

impl Cluster {
    pub fn new(id: u32, x: f64, y: f64, size: f64) -> Self {
        Self {
            id,
            x,
            y,
            size,
            members: Vec::new(),
            clusterhead: None,
        }
    }

    /// Geometric center of the cell
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }

    /// Whether a position lies inside this cell (half-open on the upper edges)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.size && y >= self.y && y < self.y + self.size
    }

    /// Append a member slot. Adding an existing member is a no-op.
    pub fn add_member(&mut self, slot: usize) -> bool {
        if self.members.contains(&slot) {
            return false;
        }
        self.members.push(slot);
        true
    }

    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn clusterhead(&self) -> Option<usize> {
        self.clusterhead
    }

    /// Re-run election over the current membership and store the result
    pub fn elect(&mut self, nodes: &NodeTable) -> Option<usize> {
        self.clusterhead = elect_clusterhead(self, nodes);
        self.clusterhead
    }

    /// Report view with node ids resolved
    pub fn summary(&self, nodes: &NodeTable) -> ClusterSummary {
        ClusterSummary {
            id: self.id,
            x: self.x,
            y: self.y,
            size: self.size,
            members: self.members.iter().map(|&slot| nodes[slot].id).collect(),
            clusterhead: self.clusterhead.map(|slot| nodes[slot].id),
        }
    }
}

/// Read-only description of a cluster for reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub members: Vec<NodeId>,
    pub clusterhead: Option<NodeId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    #[test]
    fn center_and_containment() {
        let c = Cluster::new(0, 5.0, 10.0, 5.0);
        assert_eq!(c.center(), (7.5, 12.5));
        assert!(c.contains(5.0, 10.0));
        assert!(c.contains(9.99, 14.99));
        assert!(!c.contains(10.0, 12.0));
        assert!(!c.contains(6.0, 15.0));
    }

    #[test]
    fn members_keep_insertion_order_without_duplicates() {
        let mut c = Cluster::new(0, 0.0, 0.0, 5.0);
        assert!(c.add_member(2));
        assert!(c.add_member(0));
        assert!(!c.add_member(2));
        assert_eq!(c.members(), &[2, 0]);
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn summary_resolves_ids() {
        let mut nodes = NodeTable::new();
        nodes.insert(Node::new(10, 1.0, 1.0, 1.0, 1.0, 1.0));
        nodes.insert(Node::new(11, 2.0, 2.0, 9.0, 9.0, 9.0));

        let mut c = Cluster::new(4, 0.0, 0.0, 5.0);
        c.add_member(0);
        c.add_member(1);
        assert_eq!(c.summary(&nodes).clusterhead, None);

        c.elect(&nodes);
        let summary = c.summary(&nodes);
        assert_eq!(summary.id, 4);
        assert_eq!(summary.members, vec![10, 11]);
        assert_eq!(summary.clusterhead, Some(11));
    }
}
