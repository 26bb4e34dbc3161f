//! Clusterhead election

use crate::cluster::Cluster;
use crate::graph::NodeTable;

/// Pick the clusterhead slot for a cluster, or `None` when it has no members.
///
/// The highest fitness wins. Members tied at the maximum are separated by
/// squared distance to the cell center, and remaining ties go to the member
/// added first. The result depends only on membership and its order.
pub fn elect_clusterhead(cluster: &Cluster, nodes: &NodeTable) -> Option<usize> {
    let mut max_fitness = f64::NEG_INFINITY;
    let mut candidates: Vec<usize> = Vec::new();

    for &slot in cluster.members() {
        // NaN fitness ranks below every real score
        let f = match nodes[slot].fitness() {
            f if f.is_nan() => f64::NEG_INFINITY,
            f => f,
        };
        if candidates.is_empty() || f > max_fitness {
            max_fitness = f;
            candidates.clear();
            candidates.push(slot);
        } else if f == max_fitness {
            candidates.push(slot);
        }
    }

    match candidates.as_slice() {
        [] => None,
        [only] => Some(*only),
        tied => {
            let (cx, cy) = cluster.center();
            log::debug!(
                "Cluster {}: {} members tied at fitness {:.2}, breaking by distance to center",
                cluster.id,
                tied.len(),
                max_fitness
            );
            tied.iter().copied().min_by(|&a, &b| {
                nodes[a]
                    .distance_squared_to_point(cx, cy)
                    .total_cmp(&nodes[b].distance_squared_to_point(cx, cy))
            })
        }
    }
}
