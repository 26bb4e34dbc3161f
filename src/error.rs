//! Error types for placement, routing and ingestion

use crate::graph::NodeId;
use thiserror::Error;

/// A node could not be mapped onto the instantiated grid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// Node coordinates fall outside the area covered by the grid
    #[error("node {node} at ({x:.2}, {y:.2}) lies outside the cluster grid")]
    OutOfBounds { node: NodeId, x: f64, y: f64 },
}

/// Greedy forwarding could not produce a path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Source or destination id is not part of the network
    #[error("node {0} not found")]
    UnknownNode(NodeId),

    /// Dead end: nothing is within radio range of the current node
    #[error("no neighbors found for node {node} within radio range")]
    NoNeighbors { node: NodeId },

    /// The chosen next hop is already on the path
    #[error("loop detected: node {node} is already in the path")]
    LoopDetected { node: NodeId, path: Vec<NodeId> },
}

/// Errors raised while building or mutating a network model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("invalid grid: width {width}, height {height} and cluster size {cluster_size} must all be positive")]
    InvalidGrid {
        width: u32,
        height: u32,
        cluster_size: u32,
    },

    #[error("node {0} is already part of the network")]
    DuplicateNode(NodeId),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Errors that abort reading a whole node file
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read node data: {0}")]
    Io(#[from] std::io::Error),

    #[error("node file is empty, expected a node count on the first line")]
    MissingHeader,

    #[error("invalid node count line: {line:?}")]
    InvalidHeader { line: String },
}
