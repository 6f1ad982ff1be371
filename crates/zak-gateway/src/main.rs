//! ZAK adapter pilot
//!
//! - `mode: http`   : POST /zak/execute, GET /zak/health
//! - `mode: sentry` : UDP packet telemetry -> PASS / DROP / ABORTED
//! - Audit trail as JSON lines on stdout; diagnostics on stderr
//!
//! Config path: first CLI argument, default `zak.yaml`.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use zak_core::audit::{AuditSink, StdoutSink};
use zak_core::error::{Result, ZakError};
use zak_gateway::adapters::SentryAdapter;
use zak_gateway::config::{self, Mode, ZakConfig};
use zak_gateway::kernel::PilotKernel;
use zak_gateway::{app_state, router, transport};

#[tokio::main]
async fn main() {
    // stdout is reserved for the audit stream.
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.code(), "zak gateway stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "zak.yaml".into());
    let cfg = config::load_from_file(&path)?;

    let kernel = Arc::new(PilotKernel::new(Duration::from_millis(
        cfg.kernel.simulated_latency_ms,
    )));
    let sink: Arc<dyn AuditSink> = Arc::new(StdoutSink::stdout());

    match cfg.mode {
        Mode::Http => serve_http(cfg, kernel, sink).await,
        Mode::Sentry => serve_sentry(cfg, kernel, sink).await,
    }
}

async fn serve_http(cfg: ZakConfig, kernel: Arc<PilotKernel>, sink: Arc<dyn AuditSink>) -> Result<()> {
    let listen = cfg.http.listen_addr()?;
    let state = app_state::AppState::new(cfg, kernel, sink);
    let app = router::build_router(state);

    tracing::info!(%listen, "zak http adapter starting (POST /zak/execute, GET /zak/health)");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ZakError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ZakError::Internal(format!("server failed: {e}")))
}

async fn serve_sentry(cfg: ZakConfig, kernel: Arc<PilotKernel>, sink: Arc<dyn AuditSink>) -> Result<()> {
    let listen = cfg.sentry.listen_addr()?;
    let adapter = Arc::new(SentryAdapter::new(cfg.sentry.adapter_id.clone(), kernel, sink));

    tracing::info!(%listen, "zak ingress sentry starting (signaling storm mitigation)");
    let socket = tokio::net::UdpSocket::bind(listen)
        .await
        .map_err(|e| ZakError::Internal(format!("failed to bind {listen}: {e}")))?;

    transport::udp::serve(socket, adapter, cfg.sentry.prefilter_pulses).await
}
