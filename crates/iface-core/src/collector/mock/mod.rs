//! Mock filesystem implementations for testing.
//!
//! This module provides `MockFs` and pre-built `/proc/net/dev` scenarios for
//! testing the collector without requiring actual Linux `/proc` access.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
