//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc/net/dev` states for testing
//! discovery and collection under various conditions.

use super::filesystem::MockFs;

/// Title and header lines as printed by the kernel.
const NET_DEV_HEADER: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
";

impl MockFs {
    /// Creates a typical host with loopback, wired and wireless interfaces.
    ///
    /// Includes `/proc/sys/kernel/hostname` set to `testhost`.
    pub fn typical_net_dev() -> Self {
        Self::with_net_dev(
            "\
    lo: 12345678     9876    0    0    0     0          0         0 12345678     9876    0    0    0     0       0          0
  eth0: 987654321   654321    5   10    0     0          0       100 123456789   456789    2    5    0     0       0          0
 wlan0: 55555555    44444    1    0    0     0          0        12  6666666     3333    0    1    0     0       0          0
",
            Some("testhost\n"),
        )
    }

    /// Creates a host with a single `eth0` interface and no hostname file.
    ///
    /// Counters: `eth0: 100 10 0 0 0 0 0 0 200 20 0 0 0 0 0 0`.
    pub fn single_interface() -> Self {
        Self::with_net_dev("  eth0: 100 10 0 0 0 0 0 0 200 20 0 0 0 0 0 0\n", None)
    }

    /// Creates a host whose `eth0` line carries a non-numeric and an
    /// out-of-range counter, followed by a well-formed `lo` line.
    pub fn with_garbage_values() -> Self {
        Self::with_net_dev(
            "\
  eth0: 100 n/a 0 0 0 0 0 0 99999999999999999999 20 0 0 0 0 0 0
    lo: 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16
",
            Some("testhost\n"),
        )
    }

    /// Creates a host where `/proc/net/dev` contains only the given data lines
    /// under the kernel's title and header lines.
    pub fn with_net_dev(rows: &str, hostname: Option<&str>) -> Self {
        let mut fs = Self::new();
        fs.set_net_dev(rows);
        if let Some(hostname) = hostname {
            fs.add_file("/proc/sys/kernel/hostname", hostname);
        }
        fs
    }

    /// Replaces the data lines of `/proc/net/dev`, keeping the header.
    pub fn set_net_dev(&mut self, rows: &str) {
        self.add_file("/proc/net/dev", format!("{NET_DEV_HEADER}{rows}"));
    }
}
