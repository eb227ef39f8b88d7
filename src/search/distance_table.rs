use std::{borrow::Borrow, hash::Hash};

use ahash::{HashMap, HashMapExt};
use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::graphs::{undirected_graph::UndirectedGraph, Distance, Label, Vertex, INFINITY};

/// Result of a single source search: one distance per vertex of the graph.
///
/// The source maps to `0`, unreachable vertices to [`INFINITY`]. The table
/// borrows the graph for its labels.
#[derive(Clone, Debug)]
pub struct DistanceTable<'a, L: Label> {
    graph: &'a UndirectedGraph<L>,
    source: Vertex,
    distances: Vec<Distance>,
}

impl<'a, L: Label> DistanceTable<'a, L> {
    pub(crate) fn new(
        graph: &'a UndirectedGraph<L>,
        source: Vertex,
        distances: Vec<Distance>,
    ) -> Self {
        DistanceTable {
            graph,
            source,
            distances,
        }
    }

    pub fn source(&self) -> &'a L {
        &self.graph.labels()[self.source as usize]
    }

    /// Distance of `label`, `None` if the label is not a vertex of the graph.
    pub fn get<Q>(&self, label: &Q) -> Option<Distance>
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let vertex = self.graph.vertex(label)?;
        self.distances.get(vertex as usize).copied()
    }

    pub fn is_reachable<Q>(&self, label: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(label).is_some_and(|distance| distance != INFINITY)
    }

    /// `(label, distance)` pairs in vertex registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&'a L, Distance)> + '_ {
        self.graph
            .labels()
            .iter()
            .zip(self.distances.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Number of vertices with a finite distance, the source included.
    pub fn number_of_reachable(&self) -> usize {
        self.distances
            .iter()
            .filter(|&&distance| distance != INFINITY)
            .count()
    }

    pub fn distances(&self) -> &[Distance] {
        &self.distances
    }

    pub fn to_hash_map(&self) -> HashMap<L, Distance> {
        let mut map = HashMap::with_capacity(self.len());
        for (label, distance) in self.iter() {
            map.insert(label.clone(), distance);
        }
        map
    }
}

/// Serialized as a map from label to distance; JSON has no infinity, so
/// unreachable vertices become `null`.
impl<'a, L> Serialize for DistanceTable<'a, L>
where
    L: Label + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (label, distance) in self.iter() {
            let distance = (distance != INFINITY).then_some(distance);
            map.serialize_entry(label, &distance)?;
        }
        map.end()
    }
}
