use std::{
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use tracing::debug;

use super::{undirected_graph::UndirectedGraph, Graph, Label, Weight};
use crate::error::{GraphError, Result};

/// Reads an edge list file, see [`parse_edge_list`].
pub fn read_edge_list(path: &Path) -> Result<UndirectedGraph<String>> {
    let reader = BufReader::new(File::open(path)?);
    let graph = parse_edge_list(reader)?;
    debug!(
        path = %path.display(),
        vertices = graph.number_of_vertices(),
        edges = graph.number_of_edges(),
        "read edge list"
    );
    Ok(graph)
}

/// Parses a whitespace separated edge list.
///
/// Each line is either `tail head weight` or a single label registering an
/// isolated vertex. Blank lines and lines starting with `#` are skipped.
/// Endpoints of an edge line are registered on first use.
pub fn parse_edge_list(reader: impl BufRead) -> Result<UndirectedGraph<String>> {
    let mut graph: UndirectedGraph<String> = UndirectedGraph::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let values: Vec<&str> = line.split_whitespace().collect();
        match values.as_slice() {
            [label] => {
                graph.add_vertex(*label);
            }
            [tail, head, weight] => {
                let weight: Weight = weight.parse().map_err(|_| GraphError::Parse {
                    line: line_number,
                    message: format!("unable to parse weight {:?}", weight),
                })?;
                graph.add_vertex(*tail);
                graph.add_vertex(*head);
                graph
                    .add_edge(*tail, *head, weight)
                    .map_err(|err| GraphError::Parse {
                        line: line_number,
                        message: err.to_string(),
                    })?;
            }
            _ => {
                return Err(GraphError::Parse {
                    line: line_number,
                    message: format!("expected `tail head weight` or `label`, got {:?}", line),
                })
            }
        }
    }

    Ok(graph)
}

/// Writes `graph` in the format read by [`parse_edge_list`]. Vertices without
/// edges are written on their own line so they survive a round trip; the
/// registration order of the parsed graph may differ.
pub fn write_edge_list<L>(graph: &UndirectedGraph<L>, writer: &mut impl Write) -> Result<()>
where
    L: Label + Display,
{
    for (tail, label) in graph.labels().iter().enumerate() {
        let tail = tail as u32;
        let out_edges = graph.out_edges(tail);
        if out_edges.len() == 0 {
            writeln!(writer, "{}", label)?;
            continue;
        }

        for edge in out_edges.filter(|edge| edge.head() >= tail) {
            if let Some(head_label) = graph.label(edge.head()) {
                writeln!(writer, "{} {} {}", label, head_label, edge.weight())?;
            }
        }
    }

    Ok(())
}

pub fn write_bincode(graph: &UndirectedGraph<String>, path: &Path) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, graph)?;
    Ok(())
}

pub fn read_bincode(path: &Path) -> Result<UndirectedGraph<String>> {
    let reader = BufReader::new(File::open(path)?);
    let graph: UndirectedGraph<String> = bincode::deserialize_from(reader)?;
    Ok(graph)
}

/// The five vertex demo graph.
pub fn sample_graph() -> UndirectedGraph<String> {
    let mut graph: UndirectedGraph<String> = UndirectedGraph::with_capacity(5);
    for label in ["A", "B", "C", "D", "E"] {
        graph.add_vertex(label);
    }

    let edges = [
        ("A", "B", 4.0),
        ("A", "C", 2.0),
        ("B", "C", 3.0),
        ("B", "D", 2.0),
        ("C", "D", 4.0),
        ("D", "E", 1.0),
    ];
    for (tail, head, weight) in edges {
        // all endpoints were registered above
        if let Err(err) = graph.add_edge(tail, head, weight) {
            unreachable!("sample graph is valid: {}", err);
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_comments_and_registers_isolated_vertices() {
        let input = "# demo\n\nA B 4\nB C 1.5\nZ\n";

        let graph = parse_edge_list(input.as_bytes()).unwrap();

        assert_eq!(graph.labels(), ["A", "B", "C", "Z"]);
        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.neighbors("Z").unwrap().len(), 0);
    }

    #[test]
    fn parse_reports_line_of_bad_weight() {
        let input = "A B 1\nB C heavy\n";

        let result = parse_edge_list(input.as_bytes());

        assert!(matches!(result, Err(GraphError::Parse { line: 2, .. })));
    }

    #[test]
    fn parse_rejects_negative_weight() {
        let result = parse_edge_list("A B -2\n".as_bytes());

        assert!(matches!(result, Err(GraphError::Parse { line: 1, .. })));
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        let result = parse_edge_list("A B\n".as_bytes());

        assert!(matches!(result, Err(GraphError::Parse { line: 1, .. })));
    }

    #[test]
    fn written_edge_list_parses_back() {
        let mut graph = sample_graph();
        graph.add_vertex("F");
        graph.add_edge("A", "B", 1.0).unwrap();

        let mut buffer = Vec::new();
        write_edge_list(&graph, &mut buffer).unwrap();
        let parsed = parse_edge_list(buffer.as_slice()).unwrap();

        assert_eq!(parsed.labels(), graph.labels());
        assert_eq!(parsed.number_of_edges(), graph.number_of_edges());
    }

    #[test]
    fn bincode_file_round_trip() {
        let graph = sample_graph();
        let path = std::env::temp_dir().join(format!(
            "weighted_paths_sample_{}.bincode",
            std::process::id()
        ));

        write_bincode(&graph, &path).unwrap();
        let restored = read_bincode(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(restored.labels(), graph.labels());
        assert_eq!(restored.number_of_edges(), 6);
    }
}
