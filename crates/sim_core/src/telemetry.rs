//! Logging and metrics setup for a simulation process.
//!
//! `log` records from the simulation are bridged into a `tracing` subscriber
//! (plain or JSON lines). A Prometheus scrape endpoint is started only when
//! an address is configured.

use std::net::SocketAddr;

use anyhow::Result;
use data_runtime::configs::telemetry::TelemetryCfg;
use tracing_subscriber::EnvFilter;

/// What was actually brought up. Keep it alive for the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryGuard {
    pub metrics_addr: Option<SocketAddr>,
}

/// Filter for the subscriber; an unparsable directive falls back to `info`.
pub fn level_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_new(level.unwrap_or("info")).unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_telemetry(cfg: &TelemetryCfg) -> Result<TelemetryGuard> {
    use tracing_subscriber::{fmt, prelude::*};
    let layer = if cfg.json_logs.unwrap_or(false) {
        fmt::layer().json().with_current_span(false).boxed()
    } else {
        fmt::layer().with_target(true).boxed()
    };
    tracing_subscriber::registry()
        .with(level_filter(cfg.log_level.as_deref()))
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    let metrics_addr = cfg.metrics_addr.as_deref().and_then(start_exporter);
    tracing::info!(
        target: "telemetry",
        log_level = cfg.log_level.as_deref().unwrap_or("info"),
        json = cfg.json_logs.unwrap_or(false),
        metrics = ?metrics_addr,
        "telemetry ready"
    );
    Ok(TelemetryGuard { metrics_addr })
}

fn start_exporter(addr: &str) -> Option<SocketAddr> {
    let parsed: SocketAddr = match addr.parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::warn!(target: "telemetry", addr, error = %e, "metrics address ignored");
            return None;
        }
    };
    match metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(parsed)
        .install()
    {
        Ok(()) => Some(parsed),
        Err(e) => {
            tracing::warn!(target: "telemetry", error = %e, "prometheus exporter not installed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_level_falls_back_to_info() {
        assert_eq!(level_filter(Some("warn")).to_string(), "warn");
        assert_eq!(level_filter(Some("sim_core=notalevel")).to_string(), "info");
        assert_eq!(level_filter(None).to_string(), "info");
    }
}
