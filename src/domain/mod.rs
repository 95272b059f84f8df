pub mod common;
pub mod format;
pub mod graph;
pub mod promql;
pub mod resource;
