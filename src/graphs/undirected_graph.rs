use std::{borrow::Borrow, fmt::Debug, hash::Hash};

use ahash::{HashMap, HashMapExt};
use serde::{Deserialize, Serialize};

use super::{
    edge::{TaillessEdge, WeightedEdge},
    is_valid_weight, Graph, Label, Vertex, Weight,
};
use crate::error::{GraphError, Result};

/// Undirected, weighted multigraph over caller supplied labels.
///
/// Vertices are append-only. Every label is mapped to a dense [`Vertex`]
/// index in registration order, and each index owns one adjacency list. An
/// edge `u -- v` is stored as `v` in the list of `u` and as `u` in the list of
/// `v`; a self-loop is stored once. Parallel edges are kept as separate
/// entries.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    try_from = "StoredGraph<L>",
    into = "StoredGraph<L>",
    bound(
        serialize = "L: Label + Serialize",
        deserialize = "L: Label + Deserialize<'de>"
    )
)]
pub struct UndirectedGraph<L: Label> {
    labels: Vec<L>,
    vertices: HashMap<L, Vertex>,
    edges: Vec<Vec<TaillessEdge>>,
    number_of_edges: u32,
}

impl<L: Label> Default for UndirectedGraph<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Label> UndirectedGraph<L> {
    pub fn new() -> Self {
        UndirectedGraph {
            labels: Vec::new(),
            vertices: HashMap::new(),
            edges: Vec::new(),
            number_of_edges: 0,
        }
    }

    pub fn with_capacity(number_of_vertices: usize) -> Self {
        UndirectedGraph {
            labels: Vec::with_capacity(number_of_vertices),
            vertices: HashMap::with_capacity(number_of_vertices),
            edges: Vec::with_capacity(number_of_vertices),
            number_of_edges: 0,
        }
    }

    /// Registers `label` and returns its index. Adding a label twice returns
    /// the existing index and leaves the adjacency untouched.
    pub fn add_vertex(&mut self, label: impl Into<L>) -> Vertex {
        let label = label.into();
        if let Some(&vertex) = self.vertices.get(&label) {
            return vertex;
        }

        let vertex = self.labels.len() as Vertex;
        self.vertices.insert(label.clone(), vertex);
        self.labels.push(label);
        self.edges.push(Vec::new());
        vertex
    }

    /// Adds the undirected edge `tail -- head`.
    ///
    /// Both endpoints must already be registered, otherwise
    /// [`GraphError::InvalidEdge`] is returned. A negative, NaN or infinite
    /// weight fails with [`GraphError::InvalidWeight`]. A failing call leaves
    /// the graph unchanged.
    pub fn add_edge<Q>(&mut self, tail: &Q, head: &Q, weight: Weight) -> Result<()>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let (Some(tail_vertex), Some(head_vertex)) = (self.vertex(tail), self.vertex(head)) else {
            return Err(GraphError::InvalidEdge {
                tail: format!("{:?}", tail),
                head: format!("{:?}", head),
            });
        };

        let edge = WeightedEdge::new(tail_vertex, head_vertex, weight)?;
        self.insert_edge(&edge);
        Ok(())
    }

    fn insert_edge(&mut self, edge: &WeightedEdge) {
        self.edges[edge.tail() as usize].push(edge.tailless());
        if edge.tail() != edge.head() {
            self.edges[edge.head() as usize].push(edge.reversed().tailless());
        }
        self.number_of_edges += 1;
    }

    /// Returns the `(neighbor, weight)` pairs of `label` in insertion order.
    pub fn neighbors<Q>(
        &self,
        label: &Q,
    ) -> Result<impl ExactSizeIterator<Item = (&L, Weight)> + '_>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let vertex = self.try_vertex(label)?;

        Ok(self.edges[vertex as usize]
            .iter()
            .map(|edge| (&self.labels[edge.head() as usize], edge.weight())))
    }

    pub fn contains<Q>(&self, label: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.vertices.contains_key(label)
    }

    pub fn vertex<Q>(&self, label: &Q) -> Option<Vertex>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.vertices.get(label).copied()
    }

    /// Like [`UndirectedGraph::vertex`] but fails with
    /// [`GraphError::UnknownVertex`].
    pub fn try_vertex<Q>(&self, label: &Q) -> Result<Vertex>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.vertex(label)
            .ok_or_else(|| GraphError::UnknownVertex(format!("{:?}", label)))
    }

    pub fn label(&self, vertex: Vertex) -> Option<&L> {
        self.labels.get(vertex as usize)
    }

    /// All labels in registration order.
    pub fn labels(&self) -> &[L] {
        &self.labels
    }
}

impl<L: Label> Graph for UndirectedGraph<L> {
    fn number_of_vertices(&self) -> u32 {
        self.labels.len() as u32
    }

    fn number_of_edges(&self) -> u32 {
        self.number_of_edges
    }

    fn out_edges(
        &self,
        source: Vertex,
    ) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_> {
        Box::new(
            self.edges[source as usize]
                .iter()
                .map(move |edge| edge.set_tail(source)),
        )
    }
}

/// Serialized form. The label index is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct StoredGraph<L> {
    labels: Vec<L>,
    edges: Vec<Vec<TaillessEdge>>,
}

impl<L: Label> From<UndirectedGraph<L>> for StoredGraph<L> {
    fn from(graph: UndirectedGraph<L>) -> Self {
        StoredGraph {
            labels: graph.labels,
            edges: graph.edges,
        }
    }
}

impl<L: Label> TryFrom<StoredGraph<L>> for UndirectedGraph<L> {
    type Error = GraphError;

    fn try_from(stored: StoredGraph<L>) -> Result<Self> {
        let StoredGraph { labels, edges } = stored;
        if labels.len() != edges.len() {
            return Err(GraphError::InvalidGraph(format!(
                "{} labels but {} adjacency lists",
                labels.len(),
                edges.len()
            )));
        }

        let mut vertices = HashMap::with_capacity(labels.len());
        for (vertex, label) in labels.iter().enumerate() {
            if vertices.insert(label.clone(), vertex as Vertex).is_some() {
                return Err(GraphError::InvalidGraph(format!(
                    "duplicate label {:?}",
                    label
                )));
            }
        }

        // every non-loop entry has to be mirrored by its reverse
        let mut unmatched: HashMap<(Vertex, Vertex, u64), i64> = HashMap::new();
        let mut number_of_edges = 0;
        for (tail, out_edges) in edges.iter().enumerate() {
            let tail = tail as Vertex;
            for edge in out_edges {
                if edge.head() as usize >= labels.len() {
                    return Err(GraphError::InvalidGraph(format!(
                        "edge head {} out of range",
                        edge.head()
                    )));
                }
                if !is_valid_weight(edge.weight()) {
                    return Err(GraphError::InvalidWeight(edge.weight()));
                }

                if edge.head() == tail {
                    number_of_edges += 1;
                    continue;
                }

                let key = (
                    tail.min(edge.head()),
                    tail.max(edge.head()),
                    edge.weight().to_bits(),
                );
                *unmatched.entry(key).or_insert(0) += if tail < edge.head() { 1 } else { -1 };
                if tail < edge.head() {
                    number_of_edges += 1;
                }
            }
        }

        if let Some(((tail, head, _), _)) = unmatched.iter().find(|(_, count)| **count != 0) {
            return Err(GraphError::InvalidGraph(format!(
                "edge {} -- {} is not stored in both directions",
                tail, head
            )));
        }

        Ok(UndirectedGraph {
            labels,
            vertices,
            edges,
            number_of_edges,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> UndirectedGraph<String> {
        let mut graph: UndirectedGraph<String> = UndirectedGraph::new();
        for label in ["A", "B", "C"] {
            graph.add_vertex(label);
        }
        graph.add_edge("A", "B", 1.0).unwrap();
        graph.add_edge("B", "C", 2.0).unwrap();
        graph.add_edge("A", "C", 4.0).unwrap();
        graph
    }

    fn neighbors_of(graph: &UndirectedGraph<String>, label: &str) -> Vec<(String, Weight)> {
        graph
            .neighbors(label)
            .unwrap()
            .map(|(neighbor, weight)| (neighbor.clone(), weight))
            .collect()
    }

    #[test]
    fn edges_are_symmetric() {
        let graph = triangle();

        assert_eq!(
            neighbors_of(&graph, "A"),
            vec![("B".to_string(), 1.0), ("C".to_string(), 4.0)]
        );
        assert_eq!(
            neighbors_of(&graph, "C"),
            vec![("B".to_string(), 2.0), ("A".to_string(), 4.0)]
        );
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(graph.number_of_vertices(), 3);
    }

    #[test]
    fn re_adding_vertex_keeps_adjacency() {
        let mut graph = triangle();
        let before = neighbors_of(&graph, "B");

        assert_eq!(graph.add_vertex("B"), 1);
        assert_eq!(neighbors_of(&graph, "B"), before);
        assert_eq!(graph.number_of_vertices(), 3);
    }

    #[test]
    fn unknown_endpoint_leaves_graph_unchanged() {
        let mut graph = triangle();

        let result = graph.add_edge("A", "Z", 1.0);

        assert!(matches!(result, Err(GraphError::InvalidEdge { .. })));
        assert_eq!(neighbors_of(&graph, "A").len(), 2);
        assert_eq!(graph.number_of_edges(), 3);
        assert!(!graph.contains("Z"));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut graph = triangle();

        let result = graph.add_edge("A", "B", -3.0);

        assert!(matches!(result, Err(GraphError::InvalidWeight(w)) if w == -3.0));
        assert_eq!(neighbors_of(&graph, "A").len(), 2);
    }

    #[test]
    fn unknown_endpoint_wins_over_bad_weight() {
        let mut graph = triangle();

        assert!(matches!(
            graph.add_edge("Q", "A", -1.0),
            Err(GraphError::InvalidEdge { .. })
        ));
    }

    #[test]
    fn neighbors_of_unknown_vertex() {
        let graph = triangle();

        assert!(matches!(
            graph.neighbors("X").map(|neighbors| neighbors.count()),
            Err(GraphError::UnknownVertex(label)) if label == "\"X\""
        ));
    }

    #[test]
    fn parallel_edges_accumulate() {
        let mut graph = triangle();
        graph.add_edge("A", "B", 0.5).unwrap();

        assert_eq!(
            neighbors_of(&graph, "B"),
            vec![
                ("A".to_string(), 1.0),
                ("C".to_string(), 2.0),
                ("A".to_string(), 0.5)
            ]
        );
        assert_eq!(graph.number_of_edges(), 4);
    }

    #[test]
    fn self_loop_is_stored_once() {
        let mut graph = triangle();
        graph.add_edge("C", "C", 1.0).unwrap();

        assert_eq!(neighbors_of(&graph, "C").len(), 3);
        assert_eq!(graph.number_of_edges(), 4);
    }

    #[test]
    fn stored_graph_rejects_one_sided_edge() {
        let stored = StoredGraph {
            labels: vec!["A".to_string(), "B".to_string()],
            edges: vec![
                vec![WeightedEdge::new(0, 1, 1.0).unwrap().tailless()],
                vec![],
            ],
        };

        assert!(matches!(
            UndirectedGraph::try_from(stored),
            Err(GraphError::InvalidGraph(_))
        ));
    }

    #[test]
    fn stored_graph_round_trip() {
        let mut graph = triangle();
        graph.add_edge("B", "B", 3.0).unwrap();

        let restored = UndirectedGraph::try_from(StoredGraph::from(graph.clone())).unwrap();

        assert_eq!(restored.labels(), graph.labels());
        assert_eq!(restored.number_of_edges(), 4);
        assert_eq!(restored.vertex("C"), Some(2));
        assert_eq!(neighbors_of(&restored, "B"), neighbors_of(&graph, "B"));
    }
}
