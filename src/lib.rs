//! Core library functions for the wireless sensor network simulator

pub mod config;
pub mod error;
pub mod graph;
pub mod cluster;
pub mod network;
pub mod data;
pub mod storage;

pub use anyhow::{Result, anyhow};
pub use error::{DataError, NetworkError, PlacementError, RouteError};
pub use network::{IngestReport, NetworkModel};
