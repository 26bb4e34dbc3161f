//! Sensor node attributes and the central node table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Caller-assigned node identifier
pub type NodeId = u32;

/// Fitness weight for radio range
pub const RANGE_WEIGHT: f64 = 0.4;
/// Fitness weight for energy
pub const ENERGY_WEIGHT: f64 = 0.4;
/// Fitness weight for processing power
pub const PROCESSING_WEIGHT: f64 = 0.2;

/// A sensor node with fixed physical attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier within a network
    pub id: NodeId,

    /// Position in the plane
    pub x: f64,
    pub y: f64,

    /// Transmission radius
    pub radio_range: f64,

    /// Energy level
    pub energy: f64,

    /// Processing power
    pub processing_power: f64,

    /// Cluster this node was placed in, set once by the network model
    cluster: Option<u32>,
}

impl Node {
    /// Create an unplaced node
    pub fn new(id: NodeId, x: f64, y: f64, radio_range: f64, energy: f64, processing_power: f64) -> Self {
        Self {
            id,
            x,
            y,
            radio_range,
            energy,
            processing_power,
            cluster: None,
        }
    }

    /// Weighted score used to rank clusterhead candidates
    pub fn fitness(&self) -> f64 {
        RANGE_WEIGHT * self.radio_range
            + ENERGY_WEIGHT * self.energy
            + PROCESSING_WEIGHT * self.processing_power
    }

    /// Euclidean distance between two node positions
    pub fn distance_to(&self, other: &Node) -> f64 {
        self.distance_to_point(other.x, other.y)
    }

    pub fn distance_to_point(&self, x: f64, y: f64) -> f64 {
        self.distance_squared_to_point(x, y).sqrt()
    }

    /// Squared distance, enough when only comparing distances
    pub fn distance_squared_to_point(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }

    /// Whether `other` lies within this node's radio range
    pub fn can_reach(&self, other: &Node) -> bool {
        self.distance_to(other) <= self.radio_range
    }

    /// Cluster the node belongs to, if it has been placed
    pub fn cluster(&self) -> Option<u32> {
        self.cluster
    }

    /// Record the cluster back-reference. Only the first assignment sticks.
    pub(crate) fn assign_cluster(&mut self, cluster_id: u32) -> bool {
        if self.cluster.is_some() {
            return false;
        }
        self.cluster = Some(cluster_id);
        true
    }
}

/// Fitness of a node
pub fn fitness(node: &Node) -> f64 {
    node.fitness()
}

/// Euclidean distance between two nodes
pub fn distance(a: &Node, b: &Node) -> f64 {
    a.distance_to(b)
}

/// Nodes in insertion order plus an id lookup.
///
/// Clusters and routes refer to nodes by their slot in this table, so the
/// table never removes or reorders entries.
#[derive(Debug, Clone, Default)]
pub struct NodeTable {
    nodes: Vec<Node>,
    id_to_index: HashMap<NodeId, usize>,
}

impl NodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            id_to_index: HashMap::with_capacity(capacity),
        }
    }

    /// Append a node, returning its slot, or `None` if the id is taken
    pub fn insert(&mut self, node: Node) -> Option<usize> {
        if self.id_to_index.contains_key(&node.id) {
            return None;
        }
        let idx = self.nodes.len();
        self.id_to_index.insert(node.id, idx);
        self.nodes.push(node);
        Some(idx)
    }

    /// Slot of the node with the given id
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.id_to_index.get(&id).copied()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).map(|idx| &self.nodes[idx])
    }

    pub(crate) fn get_mut_by_index(&mut self, idx: usize) -> Option<&mut Node> {
        self.nodes.get_mut(idx)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_to_index.contains_key(&id)
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl std::ops::Index<usize> for NodeTable {
    type Output = Node;

    fn index(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }
}
