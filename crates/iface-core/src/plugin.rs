//! Plugin facade for a host collection framework.
//!
//! The host first asks for the available metric types (discovery), then
//! repeatedly collects a subset of them. Both calls re-read `/proc/net/dev`
//! into the plugin's `StatsStore` before answering.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::collector::procfs::{CollectError, NetDevReader, ValueParseWarning};
use crate::collector::traits::FileSystem;
use crate::namespace::{self, Namespace};
use crate::storage::{RefreshReport, StatsStore};

/// Plugin name reported to the host.
pub const PLUGIN_NAME: &str = "iface";

/// Plugin version reported to the host.
pub const PLUGIN_VERSION: u32 = 2;

/// Source reported when the host name cannot be resolved.
pub const DEFAULT_HOST: &str = "localhost";

/// Kind of plugin, as understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    Collector,
}

/// Plugin identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginMeta {
    pub name: &'static str,
    pub version: u32,
    pub kind: PluginKind,
}

/// Configuration schema declared to the host. The plugin accepts no
/// options, so the schema is always empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigPolicy {}

/// A collected metric value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub namespace: Namespace,
    /// `None` when the namespace does not match any known counter.
    pub value: Option<i64>,
    /// Host the value was collected on.
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

/// Interface between a collector plugin and its host framework.
pub trait CollectorPlugin {
    /// Lists every metric currently available.
    fn metric_types(&mut self) -> Result<Vec<Namespace>, CollectError>;

    /// Collects the requested metrics, one result per namespace.
    fn collect_metrics(&mut self, requested: &[Namespace]) -> Result<Vec<Metric>, CollectError>;

    /// Declares the configuration accepted by the plugin.
    fn config_policy(&self) -> ConfigPolicy;

    fn meta(&self) -> PluginMeta;
}

/// Network interface statistics plugin.
pub struct IfacePlugin<F: FileSystem> {
    reader: NetDevReader<F>,
    stats: StatsStore,
    host: String,
    last_warnings: Vec<ValueParseWarning>,
}

impl<F: FileSystem> IfacePlugin<F> {
    /// Creates the plugin.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    ///
    /// Fails if `/proc/net/dev` cannot be read. A missing host name falls back
    /// to [`DEFAULT_HOST`].
    pub fn new(fs: F, proc_path: impl Into<String>) -> Result<Self, CollectError> {
        let reader = NetDevReader::new(fs, proc_path);

        if let Err(e) = reader.read_net_dev() {
            warn!(path = %reader.net_dev_path().display(), error = %e, "net/dev is not readable");
            return Err(e);
        }

        let host = reader.hostname().unwrap_or_else(|| {
            debug!("hostname not available, using {}", DEFAULT_HOST);
            DEFAULT_HOST.to_string()
        });

        Ok(Self {
            reader,
            stats: StatsStore::new(),
            host,
            last_warnings: Vec::new(),
        })
    }

    /// Re-reads `/proc/net/dev` into the stats store.
    pub fn refresh(&mut self) -> Result<RefreshReport, CollectError> {
        let content = self.reader.read_net_dev()?;
        let report = self.stats.refresh(&content)?;
        self.last_warnings = report.warnings.clone();
        Ok(report)
    }

    /// Counters replaced by the sentinel during the last successful refresh.
    pub fn last_warnings(&self) -> &[ValueParseWarning] {
        &self.last_warnings
    }

    pub fn stats(&self) -> &StatsStore {
        &self.stats
    }

    /// Host name stamped on collected metrics.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn reader_mut(&mut self) -> &mut NetDevReader<F> {
        &mut self.reader
    }
}

impl<F: FileSystem> CollectorPlugin for IfacePlugin<F> {
    fn metric_types(&mut self) -> Result<Vec<Namespace>, CollectError> {
        self.refresh()?;
        let namespaces = namespace::enumerate(&self.stats);
        debug!(count = namespaces.len(), "metric types listed");
        Ok(namespaces)
    }

    fn collect_metrics(&mut self, requested: &[Namespace]) -> Result<Vec<Metric>, CollectError> {
        self.refresh()?;

        let mut metrics = Vec::with_capacity(requested.len());
        for ns in requested {
            let value = namespace::resolve(&self.stats, ns)?;
            metrics.push(Metric {
                namespace: ns.clone(),
                value,
                source: self.host.clone(),
                timestamp: Utc::now(),
            });
        }

        debug!(count = metrics.len(), "metrics collected");
        Ok(metrics)
    }

    fn config_policy(&self) -> ConfigPolicy {
        ConfigPolicy::default()
    }

    fn meta(&self) -> PluginMeta {
        PluginMeta {
            name: PLUGIN_NAME,
            version: PLUGIN_VERSION,
            kind: PluginKind::Collector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;
    use std::io;

    fn plugin(fs: MockFs) -> IfacePlugin<MockFs> {
        IfacePlugin::new(fs, "/proc").unwrap()
    }

    #[test]
    fn test_new_requires_net_dev() {
        match IfacePlugin::new(MockFs::new(), "/proc") {
            Err(CollectError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            Err(e) => panic!("expected I/O error, got {}", e),
            Ok(_) => panic!("expected construction to fail"),
        }
    }

    #[test]
    fn test_new_unreadable_net_dev() {
        let mut fs = MockFs::new();
        fs.add_unreadable("/proc/net/dev");
        assert!(IfacePlugin::new(fs, "/proc").is_err());
    }

    #[test]
    fn test_host_name() {
        assert_eq!(plugin(MockFs::typical_net_dev()).host(), "testhost");
        assert_eq!(plugin(MockFs::single_interface()).host(), "localhost");
    }

    #[test]
    fn test_metric_types() {
        let mut plugin = plugin(MockFs::typical_net_dev());
        let namespaces = plugin.metric_types().unwrap();

        assert_eq!(namespaces.len(), 3 * 16);
        assert!(namespaces.contains(&Namespace::for_stat("wlan0", "multicast_recv")));
        assert!(namespaces.iter().all(|ns| ns.len() == 5));
    }

    #[test]
    fn test_end_to_end_example() {
        let mut plugin = plugin(MockFs::single_interface());

        let namespaces = plugin.metric_types().unwrap();
        let bytes_recv = Namespace::for_stat("eth0", "bytes_recv");
        assert!(namespaces.contains(&bytes_recv));

        let metrics = plugin.collect_metrics(&[bytes_recv.clone()]).unwrap();
        assert_eq!(metrics.len(), 1);
        assert_eq!(metrics[0].namespace, bytes_recv);
        assert_eq!(metrics[0].value, Some(100));
        assert_eq!(metrics[0].source, "localhost");
    }

    #[test]
    fn test_collect_every_discovered_metric() {
        let mut plugin = plugin(MockFs::typical_net_dev());
        let namespaces = plugin.metric_types().unwrap();
        let metrics = plugin.collect_metrics(&namespaces).unwrap();

        assert_eq!(metrics.len(), namespaces.len());
        for metric in &metrics {
            let iface = metric.namespace.interface().unwrap();
            let stat = metric.namespace.stat().unwrap();
            assert_eq!(metric.value, plugin.stats().get(iface, stat));
            assert_eq!(metric.source, "testhost");
        }
    }

    #[test]
    fn test_collect_unknown_metric_is_none() {
        let mut plugin = plugin(MockFs::typical_net_dev());
        let metrics = plugin
            .collect_metrics(&[
                Namespace::for_stat("eth0", "bytes_recv"),
                Namespace::for_stat("ppp0", "bytes_recv"),
            ])
            .unwrap();

        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].value, Some(987654321));
        assert_eq!(metrics[1].value, None);
    }

    #[test]
    fn test_collect_short_namespace_fails_batch() {
        let mut plugin = plugin(MockFs::typical_net_dev());
        let result = plugin.collect_metrics(&[
            Namespace::for_stat("eth0", "bytes_recv"),
            Namespace::new(["intel", "procfs", "iface", "eth0"]),
        ]);

        assert!(matches!(result, Err(CollectError::Format(_))));
    }

    #[test]
    fn test_collect_sees_new_counters() {
        let mut plugin = plugin(MockFs::single_interface());
        let ns = Namespace::for_stat("eth0", "bytes_recv");

        assert_eq!(plugin.collect_metrics(&[ns.clone()]).unwrap()[0].value, Some(100));

        plugin
            .reader_mut()
            .fs_mut()
            .set_net_dev("  eth0: 150 15 0 0 0 0 0 0 250 25 0 0 0 0 0 0\n");
        assert_eq!(plugin.collect_metrics(&[ns]).unwrap()[0].value, Some(150));
    }

    #[test]
    fn test_stale_interface_still_collected() {
        let mut plugin = plugin(MockFs::typical_net_dev());
        plugin.metric_types().unwrap();

        plugin
            .reader_mut()
            .fs_mut()
            .set_net_dev("  eth0: 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1 1\n");
        let namespaces = plugin.metric_types().unwrap();

        assert!(namespaces.contains(&Namespace::for_stat("wlan0", "bytes_recv")));
        let metrics = plugin
            .collect_metrics(&[Namespace::for_stat("wlan0", "bytes_recv")])
            .unwrap();
        assert_eq!(metrics[0].value, Some(55555555));
    }

    #[test]
    fn test_garbage_values_become_sentinel() {
        let mut plugin = plugin(MockFs::with_garbage_values());
        let metrics = plugin
            .collect_metrics(&[
                Namespace::for_stat("eth0", "packets_recv"),
                Namespace::for_stat("eth0", "bytes_sent"),
                Namespace::for_stat("lo", "multicast_sent"),
            ])
            .unwrap();

        assert_eq!(metrics[0].value, Some(-1));
        assert_eq!(metrics[1].value, Some(-1));
        assert_eq!(metrics[2].value, Some(16));

        let warnings = plugin.last_warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].field, "packets_recv");
        assert_eq!(warnings[1].field, "bytes_sent");
    }

    #[test]
    fn test_read_failure_keeps_previous_stats() {
        let mut plugin = plugin(MockFs::single_interface());
        plugin.metric_types().unwrap();

        plugin.reader_mut().fs_mut().remove_file("/proc/net/dev");
        assert!(matches!(plugin.metric_types(), Err(CollectError::Io(_))));
        assert!(matches!(
            plugin.collect_metrics(&[Namespace::for_stat("eth0", "bytes_recv")]),
            Err(CollectError::Io(_))
        ));
        assert_eq!(plugin.stats().get("eth0", "bytes_recv"), Some(100));
    }

    #[test]
    fn test_malformed_line_fails_call() {
        let mut plugin = plugin(MockFs::single_interface());
        plugin
            .reader_mut()
            .fs_mut()
            .set_net_dev("  eth0: 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15\n");

        assert!(matches!(plugin.metric_types(), Err(CollectError::Format(_))));
    }

    #[test]
    fn test_config_policy_is_empty() {
        let plugin = plugin(MockFs::typical_net_dev());
        let policy = plugin.config_policy();
        assert_eq!(policy, ConfigPolicy::default());
        assert_eq!(serde_json::to_string(&policy).unwrap(), "{}");
    }

    #[test]
    fn test_meta() {
        let plugin = plugin(MockFs::typical_net_dev());
        let meta = plugin.meta();
        assert_eq!(meta.name, "iface");
        assert_eq!(meta.version, 2);
        assert_eq!(meta.kind, PluginKind::Collector);
    }

    #[test]
    fn test_metric_serializes() {
        let mut plugin = plugin(MockFs::single_interface());
        let metrics = plugin
            .collect_metrics(&[Namespace::for_stat("eth0", "packets_sent")])
            .unwrap();

        let json = serde_json::to_value(&metrics[0]).unwrap();
        assert_eq!(json["value"], 20);
        assert_eq!(json["source"], "localhost");
        assert_eq!(json["namespace"][3], "eth0");
        assert!(json["timestamp"].is_string());
    }
}
