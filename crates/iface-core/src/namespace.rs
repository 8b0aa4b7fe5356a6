//! Metric namespaces.
//!
//! Every metric is addressed by `intel/procfs/iface/<interface>/<stat>`.
//! Internally a namespace is a list of segments; at the host boundary it is
//! joined with the platform path separator.

use std::fmt;
use std::path::{MAIN_SEPARATOR, MAIN_SEPARATOR_STR};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::collector::procfs::CollectError;
use crate::storage::StatsStore;

/// Vendor namespace segment.
pub const VENDOR: &str = "intel";
/// Source namespace segment.
pub const FS: &str = "procfs";
/// Plugin namespace segment.
pub const PLUGIN: &str = "iface";

/// Number of segments in a metric namespace.
pub const NAMESPACE_LEN: usize = 5;

/// Index of the interface segment.
const INTERFACE_SEGMENT: usize = 3;

/// Ordered path of segments identifying one metric.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(Vec<String>);

impl Namespace {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Builds `intel/procfs/iface/<interface>/<stat>`.
    pub fn for_stat(interface: &str, stat: &str) -> Self {
        Self::new([VENDOR, FS, PLUGIN, interface, stat])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Interface segment, if present.
    pub fn interface(&self) -> Option<&str> {
        self.0.get(INTERFACE_SEGMENT).map(String::as_str)
    }

    /// Statistic segment, if present.
    pub fn stat(&self) -> Option<&str> {
        self.0.get(INTERFACE_SEGMENT + 1).map(String::as_str)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(MAIN_SEPARATOR_STR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for Namespace {
    type Err = CollectError;

    /// Parses a separator-joined namespace. One leading separator is
    /// accepted; any other empty segment is kept as-is.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.strip_prefix(MAIN_SEPARATOR).unwrap_or(s);
        if path.is_empty() {
            return Err(CollectError::Format(format!("empty namespace {{{}}}", s)));
        }
        Ok(Self::new(path.split(MAIN_SEPARATOR)))
    }
}

/// Lists the namespace of every counter in the store, in sorted order.
pub fn enumerate(store: &StatsStore) -> Vec<Namespace> {
    store
        .iter()
        .map(|(iface, stat, _)| Namespace::for_stat(iface, stat))
        .collect()
}

/// Resolves a namespace to its counter.
///
/// Only the interface and stat segments are looked up; the first three are
/// not checked. Returns `Ok(None)` when the counter does not exist or the
/// namespace has segments past the stat.
pub fn resolve(store: &StatsStore, ns: &Namespace) -> Result<Option<i64>, CollectError> {
    if ns.len() < NAMESPACE_LEN {
        return Err(CollectError::Format(format!(
            "namespace length is too short (len = {})",
            ns.len()
        )));
    }

    match &ns.segments()[INTERFACE_SEGMENT..] {
        [iface, stat] => Ok(store.get(iface, stat)),
        _ => Ok(None),
    }
}
