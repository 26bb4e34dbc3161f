//! Node sources: text files and random generation

pub mod text;
pub mod generator;

use crate::graph::{Node, NodeId};
use serde::{Deserialize, Serialize};

/// Physical attributes of a node before an id is assigned
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub x: f64,
    pub y: f64,
    pub radio_range: f64,
    pub energy: f64,
    pub processing_power: f64,
}

impl NodeRecord {
    pub fn into_node(self, id: NodeId) -> Node {
        Node::new(
            id,
            self.x,
            self.y,
            self.radio_range,
            self.energy,
            self.processing_power,
        )
    }
}
