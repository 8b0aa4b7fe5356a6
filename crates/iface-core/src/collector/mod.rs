//! Network interface statistics collector for Linux.
//!
//! This module provides the pieces for reading `/proc/net/dev` and turning it
//! into per-interface counters, with support for mocking for testing on macOS.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        IfacePlugin                          │
//! │  ┌─────────────────────┐   ┌─────────────────────────────┐  │
//! │  │    NetDevReader     │   │     parser                  │  │
//! │  │  - /proc/net/dev    │──▶│  - header (_recv / _sent)   │  │
//! │  │  - hostname         │   │  - rows, value warnings     │  │
//! │  └──────────┬──────────┘   └──────────────┬──────────────┘  │
//! │             │                             │                 │
//! │             │                      ┌──────▼──────┐          │
//! │             │                      │ StatsStore  │          │
//! │             │                      └─────────────┘          │
//! │      ┌──────▼──────┐                                        │
//! │      │  FileSystem │ (trait)                                │
//! │      └──────┬──────┘                                        │
//! └─────────────┼───────────────────────────────────────────────┘
//!               │
//!       ┌───────┴───────┐
//!       │               │
//! ┌─────▼─────┐   ┌─────▼─────┐
//! │  RealFs   │   │  MockFs   │
//! │ (Linux)   │   │ (Testing) │
//! └───────────┘   └───────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use iface_core::collector::MockFs;
//! use iface_core::plugin::{CollectorPlugin, IfacePlugin};
//!
//! let fs = MockFs::typical_net_dev();
//! let mut plugin = IfacePlugin::new(fs, "/proc").unwrap();
//! let namespaces = plugin.metric_types().unwrap();
//! assert!(!namespaces.is_empty());
//! ```

pub mod mock;
pub mod procfs;
pub mod traits;

pub use mock::MockFs;
pub use procfs::{CollectError, NetDevReader};
pub use traits::{FileSystem, RealFs};
