//! Radio connectivity graph
//!
//! A directed link `a -> b` exists when `b` lies within `a`'s radio range.
//! Ranges differ per node, so links are not necessarily symmetric. This graph
//! backs diagnostics only; routing itself stays greedy.

use crate::graph::{NodeId, NodeTable};
use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use rayon::prelude::*;

/// Node tables at or above this size compute links in parallel
const PARALLEL_THRESHOLD: usize = 1000;

/// Directed radio links between all nodes of a table
pub struct RadioGraph {
    graph: DiGraph<NodeId, f64>,
}

impl RadioGraph {
    /// Build the link graph. Graph indices follow node table order.
    pub fn build(nodes: &NodeTable) -> Self {
        let slice = nodes.as_slice();
        let links_from = |src: usize| -> Vec<(usize, usize, f64)> {
            let node = &slice[src];
            slice
                .iter()
                .enumerate()
                .filter(|&(dst, other)| dst != src && node.can_reach(other))
                .map(|(dst, other)| (src, dst, node.distance_to(other)))
                .collect()
        };

        let links: Vec<(usize, usize, f64)> = if slice.len() < PARALLEL_THRESHOLD {
            (0..slice.len()).flat_map(links_from).collect()
        } else {
            (0..slice.len()).into_par_iter().flat_map(links_from).collect()
        };

        let mut graph = DiGraph::with_capacity(slice.len(), links.len());
        for node in slice {
            graph.add_node(node.id);
        }
        for (src, dst, dist) in links {
            graph.add_edge(NodeIndex::new(src), NodeIndex::new(dst), dist);
        }

        log::debug!(
            "Built radio graph with {} nodes and {} links",
            graph.node_count(),
            graph.edge_count()
        );

        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Average number of outgoing links per node
    pub fn mean_out_degree(&self) -> f64 {
        if self.graph.node_count() == 0 {
            return 0.0;
        }
        self.graph.edge_count() as f64 / self.graph.node_count() as f64
    }

    /// Whether any multi-hop path leads from `source` to `destination`
    pub fn is_reachable(&self, nodes: &NodeTable, source: NodeId, destination: NodeId) -> bool {
        match (nodes.index_of(source), nodes.index_of(destination)) {
            (Some(src), Some(dst)) => has_path_connecting(
                &self.graph,
                NodeIndex::new(src),
                NodeIndex::new(dst),
                None,
            ),
            _ => false,
        }
    }

    /// Node ids with no outgoing link
    pub fn isolated(&self) -> Vec<NodeId> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors(idx).next().is_none())
            .map(|idx| self.graph[idx])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GreedyRouter, Node};

    fn table(nodes: &[(NodeId, f64, f64, f64)]) -> NodeTable {
        let mut t = NodeTable::new();
        for &(id, x, y, r) in nodes {
            t.insert(Node::new(id, x, y, r, 1.0, 1.0));
        }
        t
    }

    #[test]
    fn links_follow_each_senders_range() {
        let t = table(&[(0, 0.0, 0.0, 5.0), (1, 4.0, 0.0, 1.0), (2, 30.0, 0.0, 1.0)]);
        let g = RadioGraph::build(&t);

        assert_eq!(g.node_count(), 3);
        // only 0 -> 1; node 1 cannot reach back
        assert_eq!(g.link_count(), 1);
        assert!((g.mean_out_degree() - 1.0 / 3.0).abs() < 1e-12);
        assert!(g.is_reachable(&t, 0, 1));
        assert!(!g.is_reachable(&t, 1, 0));
        assert_eq!(g.isolated(), vec![1, 2]);
    }

    #[test]
    fn reachability_covers_paths_greedy_forwarding_misses() {
        let t = table(&[
            (0, 0.0, 0.0, 3.0),
            (1, 3.0, 0.0, 0.1),
            (2, 6.0, 0.0, 3.0),
            (3, 0.0, 3.0, 4.5),
            (4, 4.0, 3.0, 4.5),
        ]);
        let g = RadioGraph::build(&t);
        assert!(g.is_reachable(&t, 0, 2));
        assert!(GreedyRouter::new(&t).route(0, 2).is_err());
    }

    #[test]
    fn unknown_ids_are_unreachable() {
        let t = table(&[(0, 0.0, 0.0, 5.0)]);
        let g = RadioGraph::build(&t);
        assert!(!g.is_reachable(&t, 0, 9));
        assert_eq!(RadioGraph::build(&NodeTable::new()).mean_out_degree(), 0.0);
    }
}
