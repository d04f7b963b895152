//! Telemetry configuration loaded from data/config/telemetry.toml with env overrides.

use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TelemetryCfg {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
    pub metrics_addr: Option<String>, // e.g., 127.0.0.1:9100
}

impl Default for TelemetryCfg {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            json_logs: Some(false),
            metrics_addr: None,
        }
    }
}

/// Apply `LOG_LEVEL`, `JSON_LOGS` and `METRICS_ADDR` style overrides from any lookup.
pub fn apply_overrides(mut cfg: TelemetryCfg, var: impl Fn(&str) -> Option<String>) -> TelemetryCfg {
    if let Some(lvl) = var("LOG_LEVEL") { cfg.log_level = Some(lvl); }
    if let Some(addr) = var("METRICS_ADDR") { cfg.metrics_addr = Some(addr); }
    if let Some(json) = var("JSON_LOGS").and_then(|v| v.parse().ok()) { cfg.json_logs = Some(json); }
    cfg
}

pub fn load_default() -> Result<TelemetryCfg> {
    let cfg = crate::loader::load_toml::<TelemetryCfg>("config/telemetry.toml")?.unwrap_or_default();
    Ok(apply_overrides(cfg, |k| std::env::var(k).ok()))
}
