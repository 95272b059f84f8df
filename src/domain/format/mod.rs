//! Display formatting of metric values

pub mod service;
