//! Cluster statistics and metrics

use crate::cluster::Cluster;
use crate::graph::{NodeId, NodeTable};
use serde::{Deserialize, Serialize};

/// Per-cluster statistics included in the run summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterStats {
    pub cluster_id: u32,

    pub member_count: usize,

    /// Mean fitness of all members (0 for an empty cluster)
    pub mean_fitness: f64,

    pub clusterhead: Option<NodeId>,

    pub head_fitness: Option<f64>,

    /// Distance from the clusterhead to the cell center
    pub head_offset: Option<f64>,
}

/// Calculate statistics for a cluster
pub fn calculate_cluster_stats(cluster: &Cluster, nodes: &NodeTable) -> ClusterStats {
    let member_count = cluster.len();
    let mean_fitness = if member_count == 0 {
        0.0
    } else {
        cluster
            .members()
            .iter()
            .map(|&slot| nodes[slot].fitness())
            .sum::<f64>()
            / member_count as f64
    };

    let (cx, cy) = cluster.center();
    let head = cluster.clusterhead().map(|slot| &nodes[slot]);

    ClusterStats {
        cluster_id: cluster.id,
        member_count,
        mean_fitness,
        clusterhead: head.map(|n| n.id),
        head_fitness: head.map(|n| n.fitness()),
        head_offset: head.map(|n| n.distance_to_point(cx, cy)),
    }
}

/// Share of clusters that have at least one member
pub fn occupancy(clusters: &[Cluster]) -> f64 {
    if clusters.is_empty() {
        return 0.0;
    }
    let occupied = clusters.iter().filter(|c| !c.is_empty()).count();
    occupied as f64 / clusters.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    #[test]
    fn stats_for_elected_cluster() {
        let mut nodes = NodeTable::new();
        nodes.insert(Node::new(3, 2.5, 2.5, 10.0, 10.0, 10.0));
        nodes.insert(Node::new(4, 1.0, 2.5, 20.0, 20.0, 20.0));

        let mut c = Cluster::new(0, 0.0, 0.0, 5.0);
        c.add_member(0);
        c.add_member(1);
        c.elect(&nodes);

        let stats = calculate_cluster_stats(&c, &nodes);
        assert_eq!(stats.member_count, 2);
        assert!((stats.mean_fitness - 15.0).abs() < 1e-9);
        assert_eq!(stats.clusterhead, Some(4));
        assert!((stats.head_fitness.unwrap() - 20.0).abs() < 1e-9);
        assert!((stats.head_offset.unwrap() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn stats_for_empty_cluster() {
        let stats = calculate_cluster_stats(&Cluster::new(7, 0.0, 0.0, 5.0), &NodeTable::new());
        assert_eq!(stats.cluster_id, 7);
        assert_eq!(stats.member_count, 0);
        assert_eq!(stats.mean_fitness, 0.0);
        assert_eq!(stats.clusterhead, None);
        assert_eq!(stats.head_offset, None);
    }

    #[test]
    fn occupancy_counts_non_empty_clusters() {
        let mut a = Cluster::new(0, 0.0, 0.0, 5.0);
        a.add_member(0);
        let b = Cluster::new(1, 0.0, 5.0, 5.0);
        assert_eq!(occupancy(&[a, b]), 0.5);
        assert_eq!(occupancy(&[]), 0.0);
    }
}
