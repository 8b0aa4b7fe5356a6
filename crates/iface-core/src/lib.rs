//! iface-core - network interface statistics collector library.
//!
//! Reads `/proc/net/dev`, keeps the latest counters per interface and exposes
//! them as `intel/procfs/iface/<interface>/<stat>` metrics:
//! - `collector` - filesystem access, `/proc/net/dev` parsing and reading
//! - `storage` - the per-interface stats store refreshed on every call
//! - `namespace` - metric namespaces, enumeration and lookup
//! - `plugin` - the facade a host collection framework talks to

pub mod collector;
pub mod namespace;
pub mod plugin;
pub mod storage;
