//! Chart-ready time-series assembly for a resource dashboard: value formatting, step
//! selection, gap-filling and merging of PromQL range results, served over HTTP.

pub mod api;
pub mod app_state;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod routes;
