//! Structured logging and build metrics.
//!
//! This module provides:
//! - [`init_logging`]: one-time structured logging setup with `RUST_LOG` support
//! - [`Metrics`]: aggregates [`BuildStats`] across repeated builds

use tracing_subscriber::EnvFilter;

use crate::tree::BuildStats;

/// Initialize structured logging with `RUST_LOG` environment variable support.
///
/// Defaults to `goaltree=info` when `RUST_LOG` is not set. Logs go to
/// stderr so that forest output on stdout stays machine-readable. Repeat
/// calls are ignored.
pub fn init_logging() {
    init_logging_with("goaltree=info");
}

/// Like [`init_logging`] with a caller-chosen fallback directive.
pub fn init_logging_with(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // try_init so double-init in tests doesn't panic
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();
}

/// Running totals over many builds.
///
/// Callers that rebuild on every record or option change can feed each
/// [`BuildStats`] in and report averages.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    pub builds: u64,
    pub nodes_returned: u64,
    pub nodes_pruned: u64,
    pub total_duration_ms: u64,
    pub last: Option<BuildStats>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stats: &BuildStats) {
        self.builds += 1;
        self.nodes_returned += stats.nodes as u64;
        self.nodes_pruned += stats.pruned as u64;
        self.total_duration_ms += stats.duration_ms;
        self.last = Some(stats.clone());
    }

    /// Mean build time in milliseconds, 0.0 before the first build.
    pub fn average_build_ms(&self) -> f64 {
        if self.builds == 0 {
            0.0
        } else {
            self.total_duration_ms as f64 / self.builds as f64
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "builds": self.builds,
            "nodes_returned": self.nodes_returned,
            "nodes_pruned": self.nodes_pruned,
            "total_duration_ms": self.total_duration_ms,
            "average_build_ms": self.average_build_ms(),
            "last": self.last,
        })
    }
}
