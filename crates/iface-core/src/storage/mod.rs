//! In-memory storage of the latest interface counters.

pub mod stats;

pub use stats::{RefreshReport, StatsStore};
