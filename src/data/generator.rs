//! Random node generation

use crate::config::Config;
use crate::data::NodeRecord;
use crate::graph::{Node, NodeId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws nodes uniformly over the configured area and attribute ranges
pub struct NodeGenerator {
    config: Config,
    rng: StdRng,
}

impl NodeGenerator {
    /// Generator seeded from OS entropy
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn record(&mut self) -> NodeRecord {
        NodeRecord {
            x: self.rng.gen_range(0.0..self.config.width as f64),
            y: self.rng.gen_range(0.0..self.config.height as f64),
            radio_range: self.rng.gen_range(self.config.radio_range.clone()),
            energy: self.rng.gen_range(self.config.energy.clone()),
            processing_power: self.rng.gen_range(self.config.processing_power.clone()),
        }
    }

    /// `count` nodes with ids starting at the configured first id.
    ///
    /// The count is capped so ids never run past `NodeId::MAX`.
    pub fn generate(&mut self, count: usize) -> Vec<Node> {
        let first_id = self.config.first_id;
        let available = (NodeId::MAX - first_id) as usize + 1;
        if count > available {
            log::warn!(
                "Only {} ids are available from {}, generating {} of {} nodes",
                available,
                first_id,
                available,
                count
            );
        }

        (first_id..=NodeId::MAX)
            .take(count)
            .map(|id| self.record().into_node(id))
            .collect()
    }

    /// A random number of nodes drawn from the configured count range
    pub fn generate_random_count(&mut self) -> Vec<Node> {
        let count = self.rng.gen_range(self.config.random_node_count.clone());
        log::info!("Generating {} random nodes", count);
        self.generate(count)
    }
}
