//! Shared application state for the HTTP surface.
//!
//! Holds the validated config, the one `HttpAdapter` every request goes
//! through, and the process start time reported by `/zak/health`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;

use zak_core::audit::AuditSink;
use zak_core::contract::KernelClient;

use crate::adapters::HttpAdapter;
use crate::config::ZakConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ZakConfig,
    http: HttpAdapter,
    started: Instant,
}

impl AppState {
    pub fn new(
        cfg: ZakConfig,
        kernel: Arc<dyn KernelClient<Value>>,
        sink: Arc<dyn AuditSink>,
    ) -> Self {
        let http = HttpAdapter::new(cfg.http.adapter_id.clone(), kernel, sink);
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                http,
                started: Instant::now(),
            }),
        }
    }

    pub fn cfg(&self) -> &ZakConfig {
        &self.inner.cfg
    }

    pub fn http(&self) -> &HttpAdapter {
        &self.inner.http
    }

    pub fn uptime(&self) -> Duration {
        self.inner.started.elapsed()
    }
}
