use std::path::Path;

use clap::ValueEnum;
use graphs::graph_io;
use utility::get_progressspinner;

pub mod error;
pub mod graphs;
pub mod search;
pub mod utility;

pub use error::{GraphError, Result};
pub use graphs::{undirected_graph::UndirectedGraph, Distance, Vertex, Weight, INFINITY};
pub use search::{
    dijkstra::{shortest_path, shortest_paths, shortest_paths_from_many},
    distance_table::DistanceTable,
};

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Whitespace separated `tail head weight` lines.
    EdgeList,
    Bincode,
}

pub fn read_graph(path: &Path, file_type: FileType) -> Result<UndirectedGraph<String>> {
    let spinner = get_progressspinner("Reading graph");
    let graph = match file_type {
        FileType::EdgeList => graph_io::read_edge_list(path),
        FileType::Bincode => graph_io::read_bincode(path),
    };
    spinner.finish_and_clear();
    graph
}
