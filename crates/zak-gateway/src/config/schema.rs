use std::net::SocketAddr;

use serde::Deserialize;
use zak_core::error::{Result, ZakError};

/// Upper bound accepted for `http.max_body_bytes`.
const MAX_BODY_CEILING: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZakConfig {
    pub version: u32,

    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub http: HttpSection,

    #[serde(default)]
    pub sentry: SentrySection,

    #[serde(default)]
    pub kernel: KernelSection,
}

impl ZakConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ZakError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.http.validate()?;
        self.sentry.validate()?;
        self.kernel.validate()?;

        Ok(())
    }
}

/// Which transport this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Http,
    Sentry,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    #[serde(default = "default_http_listen")]
    pub listen: String,

    #[serde(default = "default_http_adapter_id")]
    pub adapter_id: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            listen: default_http_listen(),
            adapter_id: default_http_adapter_id(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl HttpSection {
    pub fn validate(&self) -> Result<()> {
        parse_listen("http.listen", &self.listen)?;
        require_id("http.adapter_id", &self.adapter_id)?;
        if !(1..=MAX_BODY_CEILING).contains(&self.max_body_bytes) {
            return Err(ZakError::Config(format!(
                "http.max_body_bytes must be between 1 and {MAX_BODY_CEILING}"
            )));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_listen("http.listen", &self.listen)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SentrySection {
    #[serde(default = "default_sentry_listen")]
    pub listen: String,

    #[serde(default = "default_sentry_adapter_id")]
    pub adapter_id: String,

    /// Drop non-pulse datagrams before they reach the kernel.
    #[serde(default)]
    pub prefilter_pulses: bool,
}

impl Default for SentrySection {
    fn default() -> Self {
        Self {
            listen: default_sentry_listen(),
            adapter_id: default_sentry_adapter_id(),
            prefilter_pulses: false,
        }
    }
}

impl SentrySection {
    pub fn validate(&self) -> Result<()> {
        parse_listen("sentry.listen", &self.listen)?;
        require_id("sentry.adapter_id", &self.adapter_id)?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_listen("sentry.listen", &self.listen)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KernelSection {
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,
}

impl Default for KernelSection {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_simulated_latency_ms(),
        }
    }
}

impl KernelSection {
    pub fn validate(&self) -> Result<()> {
        if self.simulated_latency_ms > 60_000 {
            return Err(ZakError::Config(
                "kernel.simulated_latency_ms must be at most 60000".into(),
            ));
        }
        Ok(())
    }
}

fn parse_listen(field: &str, s: &str) -> Result<SocketAddr> {
    s.parse()
        .map_err(|_| ZakError::Config(format!("{field} must be a valid SocketAddr: {s}")))
}

fn require_id(field: &str, s: &str) -> Result<()> {
    if s.trim().is_empty() {
        return Err(ZakError::Config(format!("{field} must not be empty")));
    }
    Ok(())
}

fn default_http_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_http_adapter_id() -> String {
    "http-pilot-v1".into()
}
fn default_max_body_bytes() -> usize {
    1_000_000
}
fn default_sentry_listen() -> String {
    "0.0.0.0:9000".into()
}
fn default_sentry_adapter_id() -> String {
    "zak-ingress-sentry-v1".into()
}
fn default_simulated_latency_ms() -> u64 {
    10
}
