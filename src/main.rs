use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use wsn_cluster_sim::config::Config;
use wsn_cluster_sim::data::generator::NodeGenerator;
use wsn_cluster_sim::data::text::read_nodes;
use wsn_cluster_sim::graph::{NodeId, RadioGraph};
use wsn_cluster_sim::storage;
use wsn_cluster_sim::NetworkModel;

/// Where the nodes come from
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Generate a random network
    Random,
    /// Read nodes from the input file
    File,
}

#[derive(Parser, Debug)]
#[clap(
    name = "wsn-cluster-sim",
    about = "Grid clustering, clusterhead election and greedy routing for wireless sensor networks"
)]
struct Cli {
    /// Node source
    #[clap(long, value_enum, default_value = "random")]
    mode: Mode,

    /// Node file used in file mode
    #[clap(long, default_value = "input.txt")]
    input: PathBuf,

    /// Output directory for the snapshot and summary
    #[clap(long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of random nodes (random count between 10 and 100 if omitted)
    #[clap(long)]
    nodes: Option<usize>,

    /// Seed for random mode
    #[clap(long)]
    seed: Option<u64>,

    /// Width of the deployment area
    #[clap(long, default_value = "20")]
    width: u32,

    /// Height of the deployment area
    #[clap(long, default_value = "20")]
    height: u32,

    /// Side length of each cluster
    #[clap(long, default_value = "5")]
    cluster_size: u32,

    /// Id of the first node
    #[clap(long, default_value = "0")]
    first_id: NodeId,

    /// Route query as SRC:DST (repeatable)
    #[clap(long = "route", value_parser = parse_route_query)]
    routes: Vec<(NodeId, NodeId)>,

    /// Prompt for route queries on stdin
    #[clap(long)]
    interactive: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn parse_route_query(s: &str) -> Result<(NodeId, NodeId), String> {
    let (src, dst) = s
        .split_once(':')
        .ok_or_else(|| format!("expected SRC:DST, got {s:?}"))?;
    let src = src.trim().parse().map_err(|_| format!("invalid source id {src:?}"))?;
    let dst = dst.trim().parse().map_err(|_| format!("invalid destination id {dst:?}"))?;
    Ok((src, dst))
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let config = Config {
        first_id: args.first_id,
        ..Config::new(args.width, args.height, args.cluster_size)
    };
    config.validate()?;

    // 1. Build the grid
    let mut wsn = NetworkModel::new(config.width, config.height, config.cluster_size)?;

    // 2. Load or generate nodes
    let (nodes, snapshot_name) = match args.mode {
        Mode::Random => {
            let mut generator = match args.seed {
                Some(seed) => NodeGenerator::with_seed(config.clone(), seed),
                None => NodeGenerator::new(config.clone()),
            };
            let nodes = match args.nodes {
                Some(count) => generator.generate(count),
                None => generator.generate_random_count(),
            };
            (nodes, "network_random.txt")
        }
        Mode::File => {
            let file = read_nodes(&args.input, config.first_id)
                .with_context(|| format!("failed to load {}", args.input.display()))?;
            for skipped in &file.skipped {
                eprintln!(
                    "Error parsing line {}: {} ({})",
                    skipped.line, skipped.content, skipped.reason
                );
            }
            (file.nodes, "network.txt")
        }
    };

    // 3. Place nodes and elect clusterheads
    let report = wsn.add_nodes(nodes);
    for err in &report.unplaced {
        eprintln!("{}", err);
    }
    wsn.elect_all();

    // 4. Save results
    let path = storage::save_results(&wsn, &args.output_dir, snapshot_name)?;
    println!("\nNetwork information has been written to {}", path.display());

    println!("\n{}", storage::render_cluster_info(&wsn));

    // 5. Answer route queries
    let radio = wsn.radio_graph();
    for &(src, dst) in &args.routes {
        print_route(&wsn, &radio, src, dst);
    }

    if args.interactive {
        route_prompt(&wsn, &radio)?;
    }

    log::info!("Done");

    Ok(())
}

fn print_route(wsn: &NetworkModel, radio: &RadioGraph, src: NodeId, dst: NodeId) {
    match wsn.route(src, dst) {
        Ok(route) => println!("Route: {}", route),
        Err(err) => {
            println!("No route found between the specified nodes. ({})", err);
            if radio.is_reachable(wsn.nodes(), src, dst) {
                log::info!(
                    "A multi-hop path from {} to {} exists, but greedy forwarding cannot follow it",
                    src,
                    dst
                );
            }
        }
    }
}

/// Read source/destination pairs until `q` or end of input
fn route_prompt(wsn: &NetworkModel, radio: &RadioGraph) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "\nEnter source node ID (or 'q' to quit): ")?;
        stdout.flush()?;
        let Some(source) = lines.next().transpose()? else {
            break;
        };
        let source = source.trim().to_string();
        if source.eq_ignore_ascii_case("q") {
            break;
        }

        write!(stdout, "Enter destination node ID: ")?;
        stdout.flush()?;
        let Some(dest) = lines.next().transpose()? else {
            break;
        };

        match (source.parse::<NodeId>(), dest.trim().parse::<NodeId>()) {
            (Ok(src), Ok(dst)) => print_route(wsn, radio, src, dst),
            _ => println!("Invalid input. Please enter valid node IDs."),
        }
    }

    Ok(())
}
