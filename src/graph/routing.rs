//! Greedy geographic forwarding
//!
//! Every hop moves to the in-range neighbor closest to the destination. The
//! router never backtracks, so it can fail even when a longer path exists
//! (for example one that first moves away from the destination). Such failures
//! are reported as `NoNeighbors` or `LoopDetected`, never papered over with a
//! different search.

use crate::error::RouteError;
use crate::graph::{Node, NodeId, NodeTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A successful route, source first and destination last
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    hops: Vec<NodeId>,
}

impl Route {
    pub fn hops(&self) -> &[NodeId] {
        &self.hops
    }

    pub fn source(&self) -> Option<NodeId> {
        self.hops.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.hops.last().copied()
    }

    /// Number of transmissions along the route
    pub fn hop_count(&self) -> usize {
        self.hops.len().saturating_sub(1)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use itertools::Itertools;
        write!(f, "{}", self.hops.iter().join(" -> "))
    }
}

/// Range-limited greedy router over a node table
pub struct GreedyRouter<'a> {
    nodes: &'a NodeTable,
}

impl<'a> GreedyRouter<'a> {
    pub fn new(nodes: &'a NodeTable) -> Self {
        Self { nodes }
    }

    /// Slots of every other node within `current`'s radio range, in table order
    pub fn neighbors(&self, current: usize) -> Vec<usize> {
        let node = &self.nodes[current];
        self.nodes
            .iter()
            .enumerate()
            .filter(|&(idx, other)| idx != current && node.can_reach(other))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Find a path from `source` to `destination` by greedy forwarding
    pub fn route(&self, source: NodeId, destination: NodeId) -> Result<Route, RouteError> {
        let src_idx = self
            .nodes
            .index_of(source)
            .ok_or(RouteError::UnknownNode(source))?;
        let dst_idx = self
            .nodes
            .index_of(destination)
            .ok_or(RouteError::UnknownNode(destination))?;
        let dest = &self.nodes[dst_idx];

        let mut path = vec![src_idx];
        let mut visited: HashSet<usize> = HashSet::from([src_idx]);
        let mut current = src_idx;

        while current != dst_idx {
            let neighbors = self.neighbors(current);
            let next = self
                .closest_to(&neighbors, dest)
                .ok_or(RouteError::NoNeighbors {
                    node: self.nodes[current].id,
                })?;

            if !visited.insert(next) {
                log::debug!(
                    "Greedy forwarding from {} cycled back to {}",
                    self.nodes[current].id,
                    self.nodes[next].id
                );
                return Err(RouteError::LoopDetected {
                    node: self.nodes[next].id,
                    path: self.ids(&path),
                });
            }

            log::debug!(
                "Hop {} -> {} ({:.2} from destination)",
                self.nodes[current].id,
                self.nodes[next].id,
                self.nodes[next].distance_to(dest)
            );
            path.push(next);
            current = next;
        }

        Ok(Route {
            hops: self.ids(&path),
        })
    }

    /// First candidate at minimum distance to `dest`
    fn closest_to(&self, candidates: &[usize], dest: &Node) -> Option<usize> {
        candidates.iter().copied().min_by(|&a, &b| {
            self.nodes[a]
                .distance_to(dest)
                .total_cmp(&self.nodes[b].distance_to(dest))
        })
    }

    fn ids(&self, path: &[usize]) -> Vec<NodeId> {
        path.iter().map(|&idx| self.nodes[idx].id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(nodes: &[(NodeId, f64, f64, f64)]) -> NodeTable {
        let mut t = NodeTable::new();
        for &(id, x, y, r) in nodes {
            t.insert(Node::new(id, x, y, r, 10.0, 10.0));
        }
        t
    }

    #[test]
    fn routes_along_a_line() {
        let t = table(&[
            (0, 0.0, 0.0, 3.0),
            (1, 2.0, 0.0, 3.0),
            (2, 4.0, 0.0, 3.0),
            (3, 6.0, 0.0, 3.0),
        ]);
        let route = GreedyRouter::new(&t).route(0, 3).unwrap();
        assert_eq!(route.hops(), vec![0, 1, 2, 3]);
        assert_eq!(route.hop_count(), 3);
        assert_eq!(route.to_string(), "0 -> 1 -> 2 -> 3");
    }

    #[test]
    fn prefers_neighbor_closest_to_destination() {
        let t = table(&[
            (0, 0.0, 0.0, 5.0),
            (1, 1.0, 0.0, 5.0),
            (2, 4.0, 0.0, 5.0),
            (3, 8.0, 0.0, 5.0),
        ]);
        let route = GreedyRouter::new(&t).route(0, 3).unwrap();
        assert_eq!(route.hops(), vec![0, 2, 3]);
    }

    #[test]
    fn equal_distance_candidates_resolve_to_first_in_table_order() {
        let t = table(&[
            (0, 0.0, 0.0, 5.0),
            (5, 3.0, 1.0, 5.0),
            (4, 3.0, -1.0, 5.0),
            (9, 6.0, 0.0, 1.0),
        ]);
        let route = GreedyRouter::new(&t).route(0, 9).unwrap();
        assert_eq!(route.hops(), vec![0, 5, 9]);
    }

    #[test]
    fn source_equal_to_destination_is_a_single_node_route() {
        let t = table(&[(0, 0.0, 0.0, 0.0)]);
        let route = GreedyRouter::new(&t).route(0, 0).unwrap();
        assert_eq!(route.hops(), vec![0]);
        assert_eq!(route.hop_count(), 0);
        assert_eq!(route.source(), route.destination());
    }

    #[test]
    fn empty_route_has_no_endpoints() {
        let route: Route = serde_json::from_str(r#"{"hops":[]}"#).unwrap();
        assert!(route.hops().is_empty());
        assert_eq!(route.source(), None);
        assert_eq!(route.destination(), None);
        assert_eq!(route.hop_count(), 0);
        assert_eq!(route.to_string(), "");
    }

    #[test]
    fn unknown_endpoints_are_reported() {
        let t = table(&[(0, 0.0, 0.0, 5.0)]);
        let router = GreedyRouter::new(&t);
        assert_eq!(router.route(42, 0), Err(RouteError::UnknownNode(42)));
        assert_eq!(router.route(0, 43), Err(RouteError::UnknownNode(43)));
    }

    #[test]
    fn zero_range_source_has_no_neighbors() {
        let t = table(&[(0, 0.0, 0.0, 0.0), (1, 1.0, 0.0, 5.0)]);
        assert_eq!(
            GreedyRouter::new(&t).route(0, 1),
            Err(RouteError::NoNeighbors { node: 0 })
        );
    }

    #[test]
    fn dead_end_mid_route_is_no_neighbors() {
        let t = table(&[
            (0, 0.0, 0.0, 2.0),
            (1, 2.0, 0.0, 0.5),
            (2, 10.0, 0.0, 2.0),
        ]);
        assert_eq!(
            GreedyRouter::new(&t).route(0, 2),
            Err(RouteError::NoNeighbors { node: 1 })
        );
    }

    #[test]
    fn local_minimum_is_a_loop() {
        // Node 1 is the closest reachable node to the destination, but its
        // only way forward is back to the source.
        let t = table(&[
            (0, 0.0, 0.0, 2.0),
            (1, 2.0, 0.0, 2.0),
            (2, 20.0, 0.0, 2.0),
        ]);
        match GreedyRouter::new(&t).route(0, 2) {
            Err(RouteError::LoopDetected { node, path }) => {
                assert_eq!(node, 0);
                assert_eq!(path, vec![0, 1]);
            }
            other => panic!("expected loop, got {other:?}"),
        }
    }

    #[test]
    fn greedy_misses_detour_paths() {
        // A path 0 -> 3 -> 4 -> 2 exists, but greedy always picks node 1 first
        // because it is closer to the destination, and node 1 is a dead end.
        let t = table(&[
            (0, 0.0, 0.0, 3.0),
            (1, 3.0, 0.0, 0.1),
            (2, 6.0, 0.0, 3.0),
            (3, 0.0, 3.0, 4.5),
            (4, 4.0, 3.0, 4.5),
        ]);
        assert_eq!(
            GreedyRouter::new(&t).route(0, 2),
            Err(RouteError::NoNeighbors { node: 1 })
        );
    }

    #[test]
    fn returned_paths_never_repeat_nodes() {
        let mut t = NodeTable::new();
        for i in 0..30u32 {
            let x = (i % 6) as f64 * 2.5;
            let y = (i / 6) as f64 * 2.5;
            t.insert(Node::new(i, x, y, 3.0 + (i % 3) as f64, 1.0, 1.0));
        }
        let router = GreedyRouter::new(&t);
        for src in 0..30 {
            for dst in 0..30 {
                if let Ok(route) = router.route(src, dst) {
                    let unique: HashSet<_> = route.hops().iter().collect();
                    assert_eq!(unique.len(), route.hops().len());
                    assert_eq!(route.source(), Some(src));
                    assert_eq!(route.destination(), Some(dst));
                }
            }
        }
    }
}
