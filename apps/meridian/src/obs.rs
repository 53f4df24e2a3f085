use meridian_application::config::{LogConfig, MetricsConfig};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MERIDIAN_LOG";
const METRICS_ENV: &str = "MERIDIAN_METRICS_ADDR";

/// Environment wins over config; blank values count as unset.
fn pick(env_value: Option<String>, configured: Option<&str>) -> Option<String> {
    env_value
        .filter(|raw| !raw.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn log_filter(log: &LogConfig) -> Result<EnvFilter, String> {
    let directive = pick(std::env::var(LOG_ENV).ok(), Some(&log.level))
        .unwrap_or_else(|| "info".to_string());
    EnvFilter::try_new(&directive).map_err(|err| format!("invalid log filter {directive:?}: {err}"))
}

pub fn init_tracing(log: &LogConfig) -> Result<(), String> {
    let builder = tracing_subscriber::fmt().with_env_filter(log_filter(log)?);
    match log.format.trim().to_lowercase().as_str() {
        "json" => builder.json().init(),
        "text" => builder.init(),
        other => return Err(format!("unsupported log.format: {other}")),
    }
    Ok(())
}

/// Resolves the Prometheus listener from `MERIDIAN_METRICS_ADDR` or `[metrics] listen`.
pub fn metrics_addr(metrics: &MetricsConfig) -> Result<Option<SocketAddr>, String> {
    pick(std::env::var(METRICS_ENV).ok(), metrics.listen.as_deref())
        .map(|raw| {
            raw.parse::<SocketAddr>()
                .map_err(|err| format!("invalid metrics listen address {raw:?}: {err}"))
        })
        .transpose()
}

#[cfg(feature = "prometheus")]
pub fn init_metrics(metrics: &MetricsConfig) -> Result<Option<SocketAddr>, String> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let Some(addr) = metrics_addr(metrics)? else {
        return Ok(None);
    };
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|err| format!("failed to install prometheus exporter: {err}"))?;

    tracing::info!(metrics_addr = %addr, "prometheus metrics exporter enabled");
    Ok(Some(addr))
}

#[cfg(not(feature = "prometheus"))]
pub fn init_metrics(metrics: &MetricsConfig) -> Result<Option<SocketAddr>, String> {
    match metrics_addr(metrics)? {
        Some(_) => Err("metrics exporter requires meridian feature `prometheus`".to_string()),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{log_filter, pick};
    use meridian_application::config::LogConfig;

    #[test]
    fn env_value_overrides_config() {
        assert_eq!(
            pick(Some("debug".to_string()), Some("info")).as_deref(),
            Some("debug")
        );
        assert_eq!(pick(None, Some(" warn ")).as_deref(), Some("warn"));
        assert_eq!(pick(Some("  ".to_string()), Some("info")).as_deref(), Some("info"));
        assert_eq!(pick(None, None), None);
        assert_eq!(pick(None, Some("")), None);
    }

    #[test]
    fn config_level_builds_a_filter() {
        let log = LogConfig {
            level: "meridian=debug,tower_http=info".to_string(),
            ..LogConfig::default()
        };
        if std::env::var("MERIDIAN_LOG").is_err() {
            assert!(log_filter(&log).is_ok());
        }
    }
}
