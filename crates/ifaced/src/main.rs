//! ifaced - network interface statistics collector.
//!
//! Runs the `iface` plugin the way a host collection framework would:
//! discovers the available metrics, then collects them once or on an interval
//! and prints them as text or JSON lines.

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use iface_core::collector::{CollectError, FileSystem, RealFs};
use iface_core::namespace::Namespace;
use iface_core::plugin::{CollectorPlugin, ConfigPolicy, IfacePlugin, Metric, PluginMeta};

/// Network interface statistics collector.
#[derive(Parser)]
#[command(name = "ifaced", about = "Network interface statistics collector", version)]
struct Args {
    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// List available metric namespaces and exit.
    #[arg(short, long)]
    list: bool,

    /// Print plugin metadata and config policy as JSON and exit.
    #[arg(long)]
    policy: bool,

    /// Metric namespace to collect (repeatable). Defaults to every available metric.
    #[arg(short, long = "metric", value_name = "NAMESPACE")]
    metrics: Vec<String>,

    /// Output metrics as JSON lines.
    #[arg(long)]
    json: bool,

    /// Collection interval in seconds.
    #[arg(short, long, default_value = "10")]
    interval: u64,

    /// Number of collections to run (0 = until interrupted).
    #[arg(short, long, default_value = "1")]
    count: u64,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["ifaced", "iface_core"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Serialize)]
struct PolicyOutput<'a> {
    plugin: PluginMeta,
    policy: &'a ConfigPolicy,
}

fn print_metric(metric: &Metric, json: bool) {
    if json {
        match serde_json::to_string(metric) {
            Ok(line) => println!("{}", line),
            Err(e) => error!("Failed to serialize {}: {}", metric.namespace, e),
        }
        return;
    }

    let value = metric
        .value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{} {} {} {}",
        metric.timestamp.to_rfc3339(),
        metric.source,
        metric.namespace,
        value
    );
}

/// Parses the requested namespaces. An empty list means "everything".
fn requested_namespaces(metrics: &[String]) -> Result<Vec<Namespace>, CollectError> {
    metrics.iter().map(|m| m.parse()).collect()
}

fn run<F: FileSystem>(plugin: &mut IfacePlugin<F>, args: &Args) -> Result<(), CollectError> {
    if args.policy {
        let policy = plugin.config_policy();
        let output = PolicyOutput {
            plugin: plugin.meta(),
            policy: &policy,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => error!("Failed to serialize policy: {}", e),
        }
        return Ok(());
    }

    let available = plugin.metric_types()?;
    info!(
        "Discovered {} metrics on {} interfaces",
        available.len(),
        plugin.stats().len()
    );

    if args.list {
        for ns in &available {
            println!("{}", ns);
        }
        return Ok(());
    }

    let requested = requested_namespaces(&args.metrics)?;
    let requested = if requested.is_empty() {
        available
    } else {
        requested
    };

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let interval = Duration::from_secs(args.interval);
    let mut collected: u64 = 0;

    while running.load(Ordering::SeqCst) {
        match plugin.collect_metrics(&requested) {
            Ok(metrics) => {
                collected += 1;
                for metric in &metrics {
                    print_metric(metric, args.json);
                }
                debug!(
                    "Collection #{}: {} metrics, {} warnings",
                    collected,
                    metrics.len(),
                    plugin.last_warnings().len()
                );
            }
            Err(CollectError::Format(msg)) if collected == 0 => {
                return Err(CollectError::Format(msg));
            }
            Err(e) => {
                error!("Failed to collect metrics: {}", e);
                collected += 1;
            }
        }

        if args.count != 0 && collected >= args.count {
            break;
        }

        // Sleep with periodic checks for shutdown signal
        let sleep_interval = Duration::from_millis(100);
        let mut remaining = interval;
        while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
            let sleep_time = remaining.min(sleep_interval);
            std::thread::sleep(sleep_time);
            remaining = remaining.saturating_sub(sleep_time);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    debug!("ifaced {} starting", env!("CARGO_PKG_VERSION"));
    debug!(
        "Config: proc={}, interval={}s, count={}",
        args.proc_path, args.interval, args.count
    );

    let mut plugin = match IfacePlugin::new(RealFs::new(), &args.proc_path) {
        Ok(plugin) => plugin,
        Err(e) => {
            error!("Cannot start collector: {}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!("Reporting as host {}", plugin.host());

    match run(&mut plugin, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
