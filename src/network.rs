//! The network model: nodes, grid clusters, election and routing

use crate::cluster::metrics::calculate_cluster_stats;
use crate::cluster::{Cluster, ClusterStats, ClusterSummary, GridPartitioner};
use crate::error::{NetworkError, PlacementError, RouteError};
use crate::graph::{GreedyRouter, Node, NodeId, NodeTable, RadioGraph, Route};
use rayon::prelude::*;

/// Networks with at least this many clusters are elected in parallel
const PARALLEL_ELECTION_THRESHOLD: usize = 64;

/// Outcome of adding a batch of nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Nodes placed in a cluster
    pub placed: usize,

    /// Nodes kept in the model without a cluster
    pub unplaced: Vec<PlacementError>,

    /// Ids rejected because they were already present
    pub duplicates: Vec<NodeId>,
}

/// Sensor network over a bounded area split into square clusters.
///
/// Clusters are created up front. Nodes are appended and placed once; their
/// cluster never changes afterwards. Routing ignores clusters entirely.
#[derive(Debug, Clone)]
pub struct NetworkModel {
    grid: GridPartitioner,
    nodes: NodeTable,
    clusters: Vec<Cluster>,
}

impl NetworkModel {
    /// Create an empty network and tile its area with clusters
    pub fn new(width: u32, height: u32, cluster_size: u32) -> Result<Self, NetworkError> {
        let grid = GridPartitioner::new(width, height, cluster_size)?;
        let clusters = grid.build_clusters();

        log::info!(
            "Created {}x{} network with {} clusters of size {}",
            width,
            height,
            clusters.len(),
            cluster_size
        );

        Ok(Self {
            grid,
            nodes: NodeTable::new(),
            clusters,
        })
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn cluster_size(&self) -> u32 {
        self.grid.cluster_size()
    }

    /// Add a node and place it in its cluster, returning the cluster id.
    ///
    /// A duplicate id leaves the model unchanged. A node outside the grid is
    /// still kept (it can relay routes) and the placement error is returned.
    pub fn add_node(&mut self, node: Node) -> Result<u32, NetworkError> {
        let id = node.id;
        let placement = self.grid.locate(&node);
        let slot = self
            .nodes
            .insert(node)
            .ok_or(NetworkError::DuplicateNode(id))?;

        let index = match placement {
            Ok(index) => index,
            Err(err) => {
                log::warn!("{}", err);
                return Err(err.into());
            }
        };

        let cluster = &mut self.clusters[index];
        cluster.add_member(slot);
        if let Some(node) = self.nodes.get_mut_by_index(slot) {
            node.assign_cluster(cluster.id);
        }

        log::debug!("Placed node {} in cluster {}", id, cluster.id);
        Ok(cluster.id)
    }

    /// Add every node of a batch, collecting failures instead of stopping
    pub fn add_nodes<I>(&mut self, nodes: I) -> IngestReport
    where
        I: IntoIterator<Item = Node>,
    {
        let mut report = IngestReport::default();

        for node in nodes {
            match self.add_node(node) {
                Ok(_) => report.placed += 1,
                Err(NetworkError::Placement(err)) => report.unplaced.push(err),
                Err(NetworkError::DuplicateNode(id)) => {
                    log::warn!("Skipping node {}: id already in use", id);
                    report.duplicates.push(id);
                }
                Err(err @ NetworkError::InvalidGrid { .. }) => {
                    log::error!("Unexpected error while adding node: {}", err);
                }
            }
        }

        log::info!(
            "Added {} nodes: {} placed, {} outside the grid, {} duplicates",
            report.placed + report.unplaced.len() + report.duplicates.len(),
            report.placed,
            report.unplaced.len(),
            report.duplicates.len()
        );

        report
    }

    /// Elect a clusterhead in every cluster, returning how many were elected
    pub fn elect_all(&mut self) -> usize {
        let nodes = &self.nodes;

        if self.clusters.len() < PARALLEL_ELECTION_THRESHOLD {
            for cluster in &mut self.clusters {
                cluster.elect(nodes);
            }
        } else {
            self.clusters.par_iter_mut().for_each(|cluster| {
                cluster.elect(nodes);
            });
        }

        let elected = self
            .clusters
            .iter()
            .filter(|c| c.clusterhead().is_some())
            .count();
        log::info!(
            "Elected {} clusterheads across {} clusters",
            elected,
            self.clusters.len()
        );
        elected
    }

    /// Greedy route between two nodes
    pub fn route(&self, source: NodeId, destination: NodeId) -> Result<Route, RouteError> {
        let result = GreedyRouter::new(&self.nodes).route(source, destination);
        match &result {
            Ok(route) => log::debug!("Route {}: {} hops", route, route.hop_count()),
            Err(err) => log::warn!("No route from {} to {}: {}", source, destination, err),
        }
        result
    }

    /// Radio link graph over the current nodes
    pub fn radio_graph(&self) -> RadioGraph {
        RadioGraph::build(&self.nodes)
    }

    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn cluster(&self, id: u32) -> Option<&Cluster> {
        self.clusters.get(id as usize)
    }

    /// Cluster the node was placed in
    pub fn cluster_of(&self, id: NodeId) -> Option<&Cluster> {
        self.node(id)
            .and_then(|n| n.cluster())
            .and_then(|cid| self.cluster(cid))
    }

    /// Clusterhead id of a cluster
    pub fn clusterhead_of(&self, cluster_id: u32) -> Option<NodeId> {
        self.cluster(cluster_id)
            .and_then(|c| c.clusterhead())
            .map(|slot| self.nodes[slot].id)
    }

    /// Nodes kept in the model without a cluster
    pub fn unclustered(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.cluster().is_none())
            .map(|n| n.id)
            .collect()
    }

    /// Report view of every cluster in id order
    pub fn cluster_summaries(&self) -> Vec<ClusterSummary> {
        self.clusters
            .iter()
            .map(|c| c.summary(&self.nodes))
            .collect()
    }

    pub fn cluster_stats(&self) -> Vec<ClusterStats> {
        self.clusters
            .iter()
            .map(|c| calculate_cluster_stats(c, &self.nodes))
            .collect()
    }
}
