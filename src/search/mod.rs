use collections::dijkstra_data::Path;

use crate::{
    error::Result,
    graphs::{undirected_graph::UndirectedGraph, Distance, Label},
};

pub mod collections;
pub mod dijkstra;
pub mod distance_table;

pub trait PathFinding<L>: Send + Sync {
    fn shortest_path(&self, source: &L, target: &L) -> Result<Option<Path<L>>>;

    fn shortest_path_distance(&self, source: &L, target: &L) -> Result<Option<Distance>> {
        Ok(self
            .shortest_path(source, target)?
            .map(|path| path.distance))
    }
}

impl<L: Label> PathFinding<L> for UndirectedGraph<L> {
    fn shortest_path(&self, source: &L, target: &L) -> Result<Option<Path<L>>> {
        dijkstra::shortest_path(self, source, target)
    }
}
