//! Pure graph pipeline steps: step selection, start alignment, gap-fill and merge.

pub mod graph_alignment;
pub mod graph_fill;
pub mod graph_merge;
pub mod graph_step;
