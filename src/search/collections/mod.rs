pub mod dijkstra_data;
pub mod vertex_distance_queue;
