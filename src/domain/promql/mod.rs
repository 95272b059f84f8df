//! Metrics backend wire model

pub mod model;
