//! PDF merge engine.
//!
//! Combines input documents in list order into a single output, applying the
//! page-deletion formula and the optional content filters along the way.

pub mod engine;
pub mod pagetree;
pub mod scrub;

pub use engine::{MergeOutcome, MergeStatistics, Merger};
