use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::{ensure, Context};
use clap::Parser;
use indicatif::ProgressIterator;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;
use weighted_paths::{
    graphs::{graph_io::write_edge_list, Graph},
    utility::{get_progressbar, init_tracing},
    UndirectedGraph,
};

/// Writes a random connected graph as an edge list, e.g. for benchmarks.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of vertices, labeled v0, v1, ...
    #[arg(short, long)]
    vertices: u32,

    /// Number of edges, at least vertices - 1 so the graph is connected.
    #[arg(short, long)]
    edges: u32,

    /// Weights are drawn uniformly from 0..=max_weight.
    #[arg(short, long, default_value_t = 100)]
    max_weight: u32,

    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Outfile in edge list format
    #[arg(short, long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    ensure!(args.vertices > 0, "at least one vertex is needed");
    ensure!(
        args.edges >= args.vertices - 1,
        "{} edges cannot connect {} vertices",
        args.edges,
        args.vertices
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut graph: UndirectedGraph<String> = UndirectedGraph::with_capacity(args.vertices as usize);
    for vertex in 0..args.vertices {
        graph.add_vertex(format!("v{}", vertex));
    }

    let bar = get_progressbar("Generating edges", args.edges as u64);
    for index in (0..args.edges).progress_with(bar) {
        // the first vertices - 1 edges form a random spanning tree
        let (tail, head) = if index + 1 < args.vertices {
            (index + 1, rng.gen_range(0..=index))
        } else {
            (
                rng.gen_range(0..args.vertices),
                rng.gen_range(0..args.vertices),
            )
        };
        let weight = rng.gen_range(0..=args.max_weight) as f64;
        graph.add_edge(&format!("v{}", tail), &format!("v{}", head), weight)?;
    }

    let mut writer = BufWriter::new(
        File::create(&args.out).with_context(|| format!("creating {}", args.out.display()))?,
    );
    writeln!(
        writer,
        "# {} vertices, {} edges, seed {}",
        graph.number_of_vertices(),
        graph.number_of_edges(),
        args.seed
    )?;
    write_edge_list(&graph, &mut writer)?;
    writer.flush()?;

    info!(path = %args.out.display(), "graph written");
    Ok(())
}
