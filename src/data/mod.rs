//! Input loading module

pub mod edges;

pub use edges::{load_edge_list, EdgeList};
