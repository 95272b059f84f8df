pub mod format;
pub mod graph;
