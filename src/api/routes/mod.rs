//! API route declarations (e.g., /api/v1/*)

pub mod format_routes;
pub mod graph_routes;
