//! # visum-net CLI
//!
//! Command-line interface for the visum-net library.
//! Inspects PTV Visum `.net` files and exports the derived road graph.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::error;

use visum_net::{extract_graph, wkt, Graph, Network};

/// Command-line interface for visum-net
#[derive(Parser)]
#[command(name = "visum-net")]
#[command(about = "PTV Visum network file inspector and road graph exporter")]
#[command(long_about = "Parses PTV Visum .net network files:
  visum-net stats city.net                 # Summarize the parsed tables
  visum-net graph city.net                 # Export the road graph as WKT rows
  visum-net graph city.net --format json   # Export the road graph as JSON
  visum-net graph city.net --limit 5       # Print only the first rows")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a network file and print a table summary
    Stats {
        /// Path to the .net file
        file: PathBuf,
    },
    /// Extract the road graph and print it
    Graph {
        /// Path to the .net file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Wkt)]
        format: Format,

        /// Print at most this many rows of each kind (WKT output only)
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Wkt,
    Json,
}

fn main() {
    if let Err(e) = run() {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr; stdout stays clean for data
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();

    match cli.command {
        Command::Stats { file } => stats(&file),
        Command::Graph {
            file,
            format,
            limit,
        } => graph(&file, format, limit),
    }
}

fn load(file: &Path) -> anyhow::Result<Network> {
    Network::from_path(file).with_context(|| format!("failed to read {}", file.display()))
}

fn stats(file: &Path) -> anyhow::Result<()> {
    let net = load(file)?;

    if let Some(version) = &net.version {
        println!(
            "version: {} ({}, {})",
            version.vers_nr, version.file_type, version.language
        );
    }
    if let Some(params) = &net.params {
        if !params.name.is_empty() {
            println!("network: {}", params.name);
        }
    }

    println!("tables:");
    for (name, count) in table_counts(&net) {
        println!("  {name}: {count}");
    }
    for raw in net.unknown_sections() {
        println!("  ${} (raw): {}", raw.name, raw.rows.len());
    }

    if let Some(nodes) = &net.nodes {
        if let Some((min_x, min_y, max_x, max_y)) = nodes.bounding_box() {
            println!("extent: ({min_x}, {min_y}) .. ({max_x}, {max_y})");
        }
    }
    if let Some(zones) = &net.zones {
        println!("population: {}", zones.total_population());
        println!("employment: {}", zones.total_employment());
    }
    if let Some(links) = &net.links {
        println!("road length: {:.2} km", links.total_length_km());
        println!("average speed: {:.1} km/h", links.average_speed_kmh());
    }
    Ok(())
}

/// (label, row count) for every table present in the store, in file layout
/// order.
fn table_counts(net: &Network) -> Vec<(&'static str, usize)> {
    let mut counts = Vec::new();
    if let Some(t) = &net.info {
        counts.push(("info lines", t.len()));
    }
    if let Some(t) = &net.poi_categories {
        counts.push(("poi categories", t.len()));
    }
    if let Some(t) = &net.user_attr_defs {
        counts.push(("user attributes", t.len()));
    }
    if let Some(t) = &net.calendar_periods {
        counts.push(("calendar periods", t.len()));
    }
    if let Some(t) = &net.valid_days {
        counts.push(("valid days", t.len()));
    }
    if let Some(t) = &net.transport_systems {
        counts.push(("transport systems", t.len()));
    }
    if let Some(t) = &net.modes {
        counts.push(("modes", t.len()));
    }
    if let Some(t) = &net.demand_segments {
        counts.push(("demand segments", t.len()));
    }
    if let Some(t) = &net.block_item_types {
        counts.push(("block item types", t.len()));
    }
    if let Some(t) = &net.vehicle_units {
        counts.push(("vehicle units", t.len()));
    }
    if let Some(t) = &net.vehicle_combinations {
        counts.push(("vehicle combinations", t.len()));
    }
    if let Some(t) = &net.vehicle_unit_mappings {
        counts.push(("vehicle unit mappings", t.len()));
    }
    if let Some(t) = &net.directions {
        counts.push(("directions", t.len()));
    }
    if let Some(t) = &net.points {
        counts.push(("points", t.len()));
    }
    if let Some(t) = &net.edge_primitives {
        counts.push(("edges", t.len()));
    }
    if let Some(t) = &net.edge_items {
        counts.push(("edge items", t.len()));
    }
    if let Some(t) = &net.faces {
        counts.push(("faces", t.len()));
    }
    if let Some(t) = &net.face_items {
        counts.push(("face items", t.len()));
    }
    if let Some(t) = &net.surfaces {
        counts.push(("surfaces", t.len()));
    }
    if let Some(t) = &net.surface_items {
        counts.push(("surface items", t.len()));
    }
    if let Some(t) = &net.nodes {
        counts.push(("nodes", t.len()));
    }
    if let Some(t) = &net.zones {
        counts.push(("zones", t.len()));
    }
    if let Some(t) = &net.link_types {
        counts.push(("link types", t.len()));
    }
    if let Some(t) = &net.links {
        counts.push(("links", t.len()));
    }
    if let Some(t) = &net.link_polys {
        counts.push(("link polygon points", t.len()));
    }
    if let Some(t) = &net.turns {
        counts.push(("turns", t.len()));
    }
    if let Some(t) = &net.connectors {
        counts.push(("connectors", t.len()));
    }
    counts
}

fn graph(file: &Path, format: Format, limit: Option<usize>) -> anyhow::Result<()> {
    let net = load(file)?;
    let graph = extract_graph(&net).context("graph extraction failed")?;
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&graph)?),
        Format::Wkt => print!("{}", render_wkt(&graph, limit)),
    }
    Ok(())
}

/// WKT rows, vertices first, both blocks sorted by id so output is stable
/// across runs.
fn render_wkt(graph: &Graph, limit: Option<usize>) -> String {
    let limit = limit.unwrap_or(usize::MAX);
    let mut out = String::new();

    let mut vertex_ids: Vec<i64> = graph.vertices.keys().copied().collect();
    vertex_ids.sort_unstable();
    out.push_str("id;geom\n");
    for id in vertex_ids.into_iter().take(limit) {
        let v = &graph.vertices[&id];
        out.push_str(&format!("{};{}\n", v.id, wkt::point(v.x, v.y)));
    }

    let mut edge_ids: Vec<i64> = graph.edges.keys().copied().collect();
    edge_ids.sort_unstable();
    out.push_str("\nid;source;target;geom\n");
    for id in edge_ids.into_iter().take(limit) {
        let e = &graph.edges[&id];
        out.push_str(&format!(
            "{};{};{};{}\n",
            e.id,
            e.source,
            e.target,
            wkt::linestring(&e.geometry)
        ));
    }
    out
}
