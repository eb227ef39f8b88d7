use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use itertools::Itertools;
use tracing::info;
use weighted_paths::{
    graphs::{graph_io, Distance, Graph, INFINITY},
    read_graph,
    search::PathFinding,
    shortest_paths, shortest_paths_from_many,
    utility::{get_progressspinner, init_tracing},
    DistanceTable, FileType,
};

/// Computes shortest path distances from a source vertex.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph file. The five vertex demo graph is used if omitted.
    #[arg(short, long)]
    graph: Option<PathBuf>,

    /// Format of the graph file.
    #[arg(short, long, value_enum, default_value_t = FileType::EdgeList)]
    file_type: FileType,

    /// Source vertex label.
    #[arg(short, long, default_value = "A")]
    source: String,

    /// Also print a shortest path to this vertex.
    #[arg(short, long)]
    target: Option<String>,

    /// Solve from every vertex of the graph in parallel.
    #[arg(long)]
    all_sources: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Store the loaded graph as .bincode, which is faster to read.
    #[arg(long)]
    write_bincode: Option<PathBuf>,
}

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let graph = match &args.graph {
        Some(path) => read_graph(path, args.file_type)
            .with_context(|| format!("reading {}", path.display()))?,
        None => graph_io::sample_graph(),
    };
    info!(
        vertices = graph.number_of_vertices(),
        edges = graph.number_of_edges(),
        "graph loaded"
    );

    if let Some(path) = &args.write_bincode {
        graph_io::write_bincode(&graph, path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "graph written");
    }

    if args.all_sources {
        let spinner = get_progressspinner("Solving from every vertex");
        let tables = shortest_paths_from_many(&graph, graph.labels())?;
        spinner.finish_and_clear();

        match args.format {
            OutputFormat::Table => {
                for table in &tables {
                    println!("from {}:", table.source());
                    print_table(table);
                }
            }
            OutputFormat::Json => {
                let by_source: BTreeMap<_, _> =
                    tables.iter().map(|table| (table.source(), table)).collect();
                println!("{}", serde_json::to_string_pretty(&by_source)?);
            }
        }
        return Ok(());
    }

    let table = shortest_paths(&graph, args.source.as_str())?;
    info!(
        source = %args.source,
        reachable = table.number_of_reachable(),
        "distances computed"
    );
    match args.format {
        OutputFormat::Table => print_table(&table),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&table)?),
    }

    if let Some(target) = &args.target {
        match graph.shortest_path(&args.source, target)? {
            Some(path) => println!(
                "path {} (distance {})",
                path.vertices.iter().join(" -> "),
                path.distance
            ),
            None => println!("no path from {} to {}", args.source, target),
        }
    }

    Ok(())
}

fn print_table(table: &DistanceTable<String>) {
    let width = table
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);

    for (label, distance) in table.iter() {
        println!("  {:<width$}  {}", label, format_distance(distance), width = width);
    }
}

fn format_distance(distance: Distance) -> String {
    if distance == INFINITY {
        "inf".to_string()
    } else {
        distance.to_string()
    }
}
