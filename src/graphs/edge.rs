use serde::{Deserialize, Serialize};

use super::{is_valid_weight, Vertex, Weight};
use crate::error::{GraphError, Result};

#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct WeightedEdge {
    tail: Vertex,
    head: Vertex,
    weight: Weight,
}

impl WeightedEdge {
    pub fn new(tail: Vertex, head: Vertex, weight: Weight) -> Result<WeightedEdge> {
        if !is_valid_weight(weight) {
            return Err(GraphError::InvalidWeight(weight));
        }

        Ok(WeightedEdge { tail, head, weight })
    }

    pub fn tail(&self) -> Vertex {
        self.tail
    }

    pub fn head(&self) -> Vertex {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn reversed(&self) -> WeightedEdge {
        WeightedEdge {
            tail: self.head,
            head: self.tail,
            weight: self.weight,
        }
    }

    pub fn tailless(&self) -> TaillessEdge {
        TaillessEdge {
            head: self.head,
            weight: self.weight,
        }
    }
}

/// Adjacency list entry; the tail is the owner of the list.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize, Debug)]
pub struct TaillessEdge {
    head: Vertex,
    weight: Weight,
}

impl TaillessEdge {
    pub fn head(&self) -> Vertex {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn set_tail(&self, tail: Vertex) -> WeightedEdge {
        WeightedEdge {
            tail,
            head: self.head,
            weight: self.weight,
        }
    }
}
