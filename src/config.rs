//! Configuration management for the network simulator

use crate::error::NetworkError;
use anyhow::{bail, Result};
use std::ops::{Range, RangeInclusive};

/// Default configuration for the network simulator
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Width of the deployment area
    pub width: u32,

    /// Height of the deployment area
    pub height: u32,

    /// Side length of each square cluster
    pub cluster_size: u32,

    /// Number of nodes drawn in random mode when no count is given
    pub random_node_count: RangeInclusive<usize>,

    /// Radio range of random nodes
    pub radio_range: Range<f64>,

    /// Energy of random nodes
    pub energy: Range<f64>,

    /// Processing power of random nodes
    pub processing_power: Range<f64>,

    /// Id given to the first ingested node
    pub first_id: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            cluster_size: 5,
            random_node_count: 10..=100,
            radio_range: 1.0..8.0,
            energy: 1.0..100.0,
            processing_power: 1.0..100.0,
            first_id: 0,
        }
    }
}

impl Config {
    /// Create a new configuration with a custom area and default random ranges
    pub fn new(width: u32, height: u32, cluster_size: u32) -> Self {
        Self {
            width,
            height,
            cluster_size,
            ..Self::default()
        }
    }

    /// Check the grid and the random ranges
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.cluster_size == 0 {
            return Err(NetworkError::InvalidGrid {
                width: self.width,
                height: self.height,
                cluster_size: self.cluster_size,
            }
            .into());
        }
        if self.random_node_count.is_empty() {
            bail!("random node count range {:?} is empty", self.random_node_count);
        }
        for (name, range) in [
            ("radio range", &self.radio_range),
            ("energy", &self.energy),
            ("processing power", &self.processing_power),
        ] {
            if range.is_empty() || !range.start.is_finite() || !range.end.is_finite() {
                bail!("{} range {:?} is empty or not finite", name, range);
            }
            if range.start < 0.0 {
                bail!("{} range {:?} must not be negative", name, range);
            }
        }
        Ok(())
    }
}
