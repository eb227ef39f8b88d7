use serde::{Deserialize, Serialize};

use crate::graphs::{Distance, Graph, Vertex, INFINITY};

/// Vertex sequence of a shortest path together with its length.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path<V> {
    pub vertices: Vec<V>,
    pub distance: Distance,
}

/// Trait for handling data access in Dijkstra's algorithm.
pub trait DijkstraData {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    /// Retrieves the predecessor of a given vertex, if any.
    fn get_predecessor(&self, vertex: Vertex) -> Option<Vertex>;

    /// Sets the predecessor for a given vertex.
    fn set_predecessor(&mut self, vertex: Vertex, predecessor: Vertex);

    /// Retrieves the distance to a given vertex, [`INFINITY`] if unreached.
    fn get_distance(&self, vertex: Vertex) -> Distance;

    /// Sets the distance to a given vertex.
    fn set_distance(&mut self, vertex: Vertex, distance: Distance);

    /// Constructs the path to a target vertex, if reachable.
    ///
    /// Traces back from the target using the predecessor data. Returns `None`
    /// if the target was not reached.
    fn get_path(&self, target: Vertex) -> Option<Path<Vertex>> {
        let distance = self.get_distance(target);
        if distance == INFINITY {
            return None;
        }

        let mut vertices = vec![target];
        let mut predecessor = target;
        while let Some(new_predecessor) = self.get_predecessor(predecessor) {
            predecessor = new_predecessor;
            vertices.push(predecessor);
        }
        vertices.reverse();

        Some(Path { vertices, distance })
    }
}

/// Distances and predecessors stored in vectors indexed by vertex.
pub struct DijkstraDataVec {
    pub predecessors: Vec<Vertex>,
    pub distances: Vec<Distance>,
}

impl DijkstraDataVec {
    pub fn new(graph: &dyn Graph) -> Self {
        DijkstraDataVec {
            predecessors: vec![Vertex::MAX; graph.number_of_vertices() as usize],
            distances: vec![INFINITY; graph.number_of_vertices() as usize],
        }
    }
}

impl DijkstraData for DijkstraDataVec {
    fn clear(&mut self) {
        self.predecessors.fill(Vertex::MAX);
        self.distances.fill(INFINITY);
    }

    fn get_predecessor(&self, vertex: Vertex) -> Option<Vertex> {
        let predecessor = self.predecessors[vertex as usize];

        if predecessor == Vertex::MAX {
            return None;
        }

        Some(predecessor)
    }

    fn set_predecessor(&mut self, vertex: Vertex, predecessor: Vertex) {
        self.predecessors[vertex as usize] = predecessor;
    }

    fn get_distance(&self, vertex: Vertex) -> Distance {
        self.distances[vertex as usize]
    }

    fn set_distance(&mut self, vertex: Vertex, distance: Distance) {
        self.distances[vertex as usize] = distance
    }
}
