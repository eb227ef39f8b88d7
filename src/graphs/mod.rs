use std::{fmt::Debug, hash::Hash};

use edge::WeightedEdge;

pub mod edge;
pub mod graph_io;
pub mod undirected_graph;

/// Dense index of a vertex, assigned in registration order.
pub type Vertex = u32;
pub type Weight = f64;
pub type Distance = f64;

/// Distance of every vertex that is not reachable from the source.
pub const INFINITY: Distance = Distance::INFINITY;

/// Opaque vertex identifier used by callers, e.g. a `String`.
pub trait Label: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T> Label for T where T: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

/// Relaxation is only correct for finite, non-negative weights.
pub fn is_valid_weight(weight: Weight) -> bool {
    weight.is_finite() && weight >= 0.0
}

/// Read-only adjacency view over dense vertex indices.
pub trait Graph: Send + Sync {
    fn number_of_vertices(&self) -> u32;

    /// Number of undirected edges, parallel edges counted separately.
    fn number_of_edges(&self) -> u32;

    fn out_edges(
        &self,
        source: Vertex,
    ) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_validation() {
        assert!(is_valid_weight(0.0));
        assert!(is_valid_weight(2.5));
        assert!(!is_valid_weight(-1.0));
        assert!(!is_valid_weight(f64::NAN));
        assert!(!is_valid_weight(INFINITY));
    }
}
