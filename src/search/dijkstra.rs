use std::{borrow::Borrow, fmt::Debug, hash::Hash};

use rayon::prelude::*;
use tracing::{debug, trace};

use super::{
    collections::{
        dijkstra_data::{DijkstraData, DijkstraDataVec, Path},
        vertex_distance_queue::{FrontierBinaryHeap, VertexDistanceQueue},
    },
    distance_table::DistanceTable,
};
use crate::{
    error::Result,
    graphs::{undirected_graph::UndirectedGraph, Graph, Label, Vertex},
};

/// Counters of a single search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Entries removed from the frontier, stale ones included.
    pub pops: u64,
    /// Entries skipped because a shorter distance was recorded after they
    /// were inserted.
    pub stale_pops: u64,
    /// Successful distance improvements.
    pub relaxations: u64,
}

/// Settles every vertex reachable from `source`.
///
/// `data` and `queue` have to be cleared. Correct only for non-negative
/// weights; with negative weights the distances are undefined.
pub fn dijkstra_one_to_all(
    graph: &dyn Graph,
    data: &mut dyn DijkstraData,
    queue: &mut dyn VertexDistanceQueue,
    source: Vertex,
) -> SearchStats {
    search(graph, data, queue, source, None)
}

/// Like [`dijkstra_one_to_all`] but stops as soon as `target` is settled.
pub fn dijkstra_one_to_one(
    graph: &dyn Graph,
    data: &mut dyn DijkstraData,
    queue: &mut dyn VertexDistanceQueue,
    source: Vertex,
    target: Vertex,
) -> SearchStats {
    search(graph, data, queue, source, Some(target))
}

fn search(
    graph: &dyn Graph,
    data: &mut dyn DijkstraData,
    queue: &mut dyn VertexDistanceQueue,
    source: Vertex,
    target: Option<Vertex>,
) -> SearchStats {
    let mut stats = SearchStats::default();

    data.set_distance(source, 0.0);
    queue.insert(source, 0.0);

    while let Some((distance_tail, tail)) = queue.pop() {
        stats.pops += 1;

        // lazy deletion: a shorter entry for tail was already processed
        if distance_tail > data.get_distance(tail) {
            stats.stale_pops += 1;
            trace!(tail, distance_tail, "skipping stale frontier entry");
            continue;
        }

        if Some(tail) == target {
            break;
        }

        for edge in graph.out_edges(tail) {
            let alternative_distance_head = distance_tail + edge.weight();
            if alternative_distance_head < data.get_distance(edge.head()) {
                data.set_distance(edge.head(), alternative_distance_head);
                data.set_predecessor(edge.head(), tail);
                queue.insert(edge.head(), alternative_distance_head);
                stats.relaxations += 1;
            }
        }
    }

    stats
}

/// Computes the distance from `source` to every vertex of `graph`.
///
/// Fails with [`GraphError::UnknownVertex`](crate::error::GraphError) if
/// `source` is not a vertex. The graph is only read, each call owns its
/// frontier and distance table.
pub fn shortest_paths<'a, L, Q>(
    graph: &'a UndirectedGraph<L>,
    source: &Q,
) -> Result<DistanceTable<'a, L>>
where
    L: Label + Borrow<Q>,
    Q: Hash + Eq + Debug + ?Sized,
{
    let source_vertex = graph.try_vertex(source)?;

    let mut data = DijkstraDataVec::new(graph);
    let mut queue = FrontierBinaryHeap::new();
    let stats = dijkstra_one_to_all(graph, &mut data, &mut queue, source_vertex);
    debug!(
        ?source,
        pops = stats.pops,
        stale_pops = stats.stale_pops,
        relaxations = stats.relaxations,
        "single source search finished"
    );

    Ok(DistanceTable::new(graph, source_vertex, data.distances))
}

/// Shortest path from `source` to `target`, `None` if `target` is not
/// reachable. Among parallel edges the cheapest one is used.
pub fn shortest_path<L, Q>(
    graph: &UndirectedGraph<L>,
    source: &Q,
    target: &Q,
) -> Result<Option<Path<L>>>
where
    L: Label + Borrow<Q>,
    Q: Hash + Eq + Debug + ?Sized,
{
    let source_vertex = graph.try_vertex(source)?;
    let target_vertex = graph.try_vertex(target)?;

    let mut data = DijkstraDataVec::new(graph);
    let mut queue = FrontierBinaryHeap::new();
    let stats = dijkstra_one_to_one(graph, &mut data, &mut queue, source_vertex, target_vertex);
    debug!(?source, ?target, pops = stats.pops, "single pair search finished");

    let path = data.get_path(target_vertex).map(|path| Path {
        vertices: path
            .vertices
            .iter()
            .map(|&vertex| graph.labels()[vertex as usize].clone())
            .collect(),
        distance: path.distance,
    });

    Ok(path)
}

/// Runs one independent search per source in parallel.
///
/// Every search allocates its own frontier and distances; the graph is shared
/// read-only. Tables are returned in the order of `sources`.
pub fn shortest_paths_from_many<'a, L>(
    graph: &'a UndirectedGraph<L>,
    sources: &[L],
) -> Result<Vec<DistanceTable<'a, L>>>
where
    L: Label,
{
    sources
        .par_iter()
        .map(|source| shortest_paths(graph, source))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::INFINITY;

    // The target is improved three times before it is settled, so three stale
    // entries remain in the frontier.
    fn fan_graph() -> UndirectedGraph<String> {
        let mut graph: UndirectedGraph<String> = UndirectedGraph::new();
        for label in ["S", "a1", "a2", "a3", "T"] {
            graph.add_vertex(label);
        }
        graph.add_edge("S", "T", 100.0).unwrap();
        graph.add_edge("S", "a1", 1.0).unwrap();
        graph.add_edge("S", "a2", 2.0).unwrap();
        graph.add_edge("S", "a3", 3.0).unwrap();
        graph.add_edge("a1", "T", 50.0).unwrap();
        graph.add_edge("a2", "T", 20.0).unwrap();
        graph.add_edge("a3", "T", 5.0).unwrap();
        graph
    }

    #[test]
    fn stale_entries_are_skipped() {
        let graph = fan_graph();
        let mut data = DijkstraDataVec::new(&graph);
        let mut queue = FrontierBinaryHeap::new();

        let stats = dijkstra_one_to_all(&graph, &mut data, &mut queue, 0);

        assert_eq!(
            stats,
            SearchStats {
                pops: 8,
                stale_pops: 3,
                relaxations: 7,
            }
        );
        assert_eq!(data.get_distance(4), 8.0);
        assert!(queue.is_empty());
    }

    #[test]
    fn reused_buffers_give_same_result() {
        let graph = fan_graph();
        let mut data = DijkstraDataVec::new(&graph);
        let mut queue = FrontierBinaryHeap::new();

        dijkstra_one_to_all(&graph, &mut data, &mut queue, 4);
        let first = data.distances.clone();
        data.clear();
        queue.clear();
        dijkstra_one_to_all(&graph, &mut data, &mut queue, 4);

        assert_eq!(data.distances, first);
        assert_eq!(first, vec![8.0, 9.0, 10.0, 5.0, 0.0]);
    }

    #[test]
    fn one_to_one_stops_at_target() {
        let graph = fan_graph();
        let mut data = DijkstraDataVec::new(&graph);
        let mut queue = FrontierBinaryHeap::new();

        let stats = dijkstra_one_to_one(&graph, &mut data, &mut queue, 0, 1);

        assert_eq!(data.get_distance(1), 1.0);
        assert_eq!(stats.pops, 2);
        assert_eq!(data.get_path(1).map(|path| path.vertices), Some(vec![0, 1]));
    }

    #[test]
    fn path_through_fan() {
        let graph = fan_graph();

        let path = shortest_path(&graph, "S", "T").unwrap().unwrap();

        assert_eq!(path.vertices, vec!["S", "a3", "T"]);
        assert_eq!(path.distance, 8.0);
    }

    #[test]
    fn unreachable_target_has_no_path() {
        let mut graph = fan_graph();
        graph.add_vertex("lonely");

        assert_eq!(shortest_path(&graph, "S", "lonely").unwrap(), None);
        assert_eq!(
            shortest_paths(&graph, "S").unwrap().get("lonely"),
            Some(INFINITY)
        );
    }
}
