//! From matches to regions: region building, deduplication, orchestration.

pub mod engine;
pub mod merge;
pub mod region;

pub use engine::LocatorEngine;
pub use merge::{merge_cluster, merge_overlapping};
pub use region::build_regions;
