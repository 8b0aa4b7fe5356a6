//! Per-interface statistics store.
//!
//! Holds `interface -> statistic -> value` for the lifetime of the plugin.
//! Every refresh overwrites the interfaces it sees, one line at a time;
//! interfaces that vanished from `/proc/net/dev` keep their last values.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::collector::procfs::parser::{NetDevRow, ParseError, ValueParseWarning, parse_net_dev};

/// Counters of a single interface, keyed by statistic name.
pub type InterfaceStats = BTreeMap<String, i64>;

/// Outcome of a successful [`StatsStore::refresh`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Number of interface lines written.
    pub interfaces: usize,
    /// Counters replaced by the sentinel value.
    pub warnings: Vec<ValueParseWarning>,
}

/// Latest counters for every interface seen so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsStore {
    interfaces: BTreeMap<String, InterfaceStats>,
}

impl StatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `/proc/net/dev` content to the store.
    ///
    /// Lines are written as they are parsed. A malformed line stops the
    /// refresh with an error; the lines before it stay written.
    pub fn refresh(&mut self, content: &str) -> Result<RefreshReport, ParseError> {
        let table = parse_net_dev(content)?;
        let mut report = RefreshReport::default();

        for row in table.rows() {
            let row = row?;
            for w in &row.warnings {
                warn!(
                    interface = %w.interface,
                    stat = %w.field,
                    raw = %w.raw,
                    value = w.value,
                    error = %w.reason,
                    "cannot parse metric value to number, metric value saved as -1"
                );
            }
            report.warnings.extend(row.warnings.iter().cloned());
            self.insert_row(row);
            report.interfaces += 1;
        }

        debug!(
            interfaces = report.interfaces,
            warnings = report.warnings.len(),
            "stats refreshed"
        );
        Ok(report)
    }

    /// Replaces the counters of the row's interface.
    pub fn insert_row(&mut self, row: NetDevRow) {
        self.interfaces.insert(row.interface, row.stats);
    }

    /// Looks up one counter.
    pub fn get(&self, interface: &str, stat: &str) -> Option<i64> {
        self.interfaces.get(interface)?.get(stat).copied()
    }

    /// All counters of one interface.
    pub fn interface(&self, interface: &str) -> Option<&InterfaceStats> {
        self.interfaces.get(interface)
    }

    /// Interface names in sorted order.
    pub fn interfaces(&self) -> impl Iterator<Item = &str> {
        self.interfaces.keys().map(String::as_str)
    }

    /// Every `(interface, stat, value)` leaf, sorted by interface then stat.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, i64)> {
        self.interfaces.iter().flat_map(|(iface, stats)| {
            stats
                .iter()
                .map(move |(stat, value)| (iface.as_str(), stat.as_str(), *value))
        })
    }

    /// Number of interfaces.
    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}
