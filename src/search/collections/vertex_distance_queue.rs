use std::{cmp::Ordering, collections::BinaryHeap};

use crate::graphs::{Distance, Vertex};

/// A priority queue of `(distance, vertex)` candidates, the frontier of a
/// search.
///
/// There is no decrease key operation. Improving a vertex inserts a second
/// entry and the search skips the stale one when it is popped.
pub trait VertexDistanceQueue {
    /// Clears all stored entries, preparing for a new search.
    fn clear(&mut self);

    /// Inserts a vertex with its tentative distance.
    fn insert(&mut self, vertex: Vertex, distance: Distance);

    /// Removes and returns the entry with the smallest distance. Entries with
    /// equal distance are returned in insertion order.
    fn pop(&mut self) -> Option<(Distance, Vertex)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    distance: Distance,
    sequence: u64,
    vertex: Vertex,
}

// `BinaryHeap` is a max-heap, so both keys are compared flipped. Distances
// are never NaN, `total_cmp` only makes the order total.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Binary heap frontier ordered by (distance, insertion sequence).
#[derive(Clone, Default)]
pub struct FrontierBinaryHeap {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
}

impl FrontierBinaryHeap {
    pub fn new() -> Self {
        FrontierBinaryHeap {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }
}

impl VertexDistanceQueue for FrontierBinaryHeap {
    fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
    }

    fn insert(&mut self, vertex: Vertex, distance: Distance) {
        self.heap.push(FrontierEntry {
            distance,
            sequence: self.next_sequence,
            vertex,
        });
        self.next_sequence += 1;
    }

    fn pop(&mut self) -> Option<(Distance, Vertex)> {
        let FrontierEntry {
            distance, vertex, ..
        } = self.heap.pop()?;

        Some((distance, vertex))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}
