//! Resource inventory helpers (device catalogue, units, table filters)

pub mod util;
