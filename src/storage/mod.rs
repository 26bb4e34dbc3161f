//! Results persistence module

use crate::network::NetworkModel;
use anyhow::Result;
use itertools::Itertools;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the JSON statistics file written next to the snapshot
pub const SUMMARY_FILE: &str = "summary.json";

/// Save the network snapshot and summary to the specified directory.
///
/// Returns the path of the snapshot file.
pub fn save_results(model: &NetworkModel, output_dir: &Path, snapshot_name: &str) -> Result<PathBuf> {
    log::info!(
        "Saving network with {} nodes to {}",
        model.nodes().len(),
        output_dir.display()
    );

    fs::create_dir_all(output_dir)?;

    let snapshot_path = output_dir.join(snapshot_name);
    write_snapshot(model, &snapshot_path)?;
    save_summary(model, &output_dir.join(SUMMARY_FILE))?;

    log::info!("Results saved successfully");
    Ok(snapshot_path)
}

/// Write the plain-text snapshot
pub fn write_snapshot(model: &NetworkModel, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(render_snapshot(model).as_bytes())?;
    log::debug!("Wrote snapshot to {}", path.display());
    Ok(())
}

/// Render node values followed by the cluster information block
pub fn render_snapshot(model: &NetworkModel) -> String {
    let mut out = format!("{}\n", model.nodes().len());

    for node in model.nodes().iter() {
        out.push_str(&format!(
            "{:.2} {:.2} {:.2} {:.2} {:.2}\n",
            node.x, node.y, node.radio_range, node.energy, node.processing_power
        ));
    }

    out.push('\n');
    out.push_str(&render_cluster_info(model));
    out
}

/// Render the "Cluster Information" block, one entry per cluster in id order
pub fn render_cluster_info(model: &NetworkModel) -> String {
    let mut out = String::from("Cluster Information:\n");

    for summary in model.cluster_summaries() {
        let head = summary
            .clusterhead
            .map_or_else(|| "None".to_string(), |id| id.to_string());
        out.push_str(&format!(
            "Cluster {}:\n  Nodes: {}\n  Clusterhead: {}\n",
            summary.id,
            summary.members.iter().join(", "),
            head
        ));
    }

    out
}

/// Save summary statistics as JSON
fn save_summary(model: &NetworkModel, path: &Path) -> Result<()> {
    log::info!("Saving summary information");

    let radio = model.radio_graph();
    let stats = model.cluster_stats();
    let summaries = model.cluster_summaries();
    let elected = summaries.iter().filter(|s| s.clusterhead.is_some()).count();

    let summary = json!({
        "network": {
            "width": model.width(),
            "height": model.height(),
            "cluster_size": model.cluster_size(),
            "node_count": model.nodes().len(),
            "unclustered": model.unclustered(),
        },
        "radio": {
            "link_count": radio.link_count(),
            "mean_out_degree": radio.mean_out_degree(),
            "isolated": radio.isolated(),
        },
        "cluster_stats": {
            "cluster_count": summaries.len(),
            "elected_count": elected,
            "occupancy": crate::cluster::metrics::occupancy(model.clusters()),
            "clusters": stats,
        },
        "clusters": summaries,
    });

    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&summary)?.as_bytes())?;
    Ok(())
}
