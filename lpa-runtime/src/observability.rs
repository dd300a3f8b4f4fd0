use lpa_common::error::{LpaError, LpaResult};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Installs the global metrics recorder and serves it on `addr`.
pub fn init_prometheus(addr: SocketAddr) -> LpaResult<()> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| LpaError::Internal(format!("prometheus init: {e}")))
}

pub(crate) fn record_superstep(
    engine: &'static str,
    superstep: u64,
    messages: usize,
    changed: usize,
    elapsed: Duration,
) {
    metrics::counter!("lpa_supersteps_total", "engine" => engine).increment(1);
    metrics::counter!("lpa_messages_total", "engine" => engine).increment(messages as u64);
    metrics::counter!("lpa_value_changes_total", "engine" => engine).increment(changed as u64);
    metrics::histogram!("lpa_superstep_duration_ms", "engine" => engine)
        .record(elapsed.as_secs_f64() * 1000.0);
    tracing::debug!(engine, superstep, messages, changed, "superstep finished");
}
