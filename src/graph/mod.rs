//! Node representation, radio connectivity and routing

pub mod node;
pub mod connectivity;
pub mod routing;

pub use node::{distance, fitness, Node, NodeId, NodeTable};
pub use connectivity::RadioGraph;
pub use routing::{GreedyRouter, Route};
