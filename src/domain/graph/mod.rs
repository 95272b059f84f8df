//! Time-series graph pipeline (step selection, alignment, gap-fill, merge, PromQL parsing)

pub mod dto;
pub mod service;
pub mod util;
