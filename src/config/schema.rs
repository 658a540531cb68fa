//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.
//! Hooks are code, not configuration: attach them to the
//! [`ProxyOptions`] returned by [`ProxyConfig::to_options`].

use serde::{Deserialize, Serialize};

use crate::proxy::ProxyOptions;
use crate::transport::ReqwestTransport;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener used by the bundled server.
    pub listener: ListenerConfig,

    /// Upstream target and forwarding behavior.
    pub proxy: UpstreamConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfig {
    /// Build proxy options from this configuration.
    pub fn to_options(&self) -> ProxyOptions {
        let options = ProxyOptions::new(self.proxy.target.clone())
            .log(self.proxy.log)
            .update_origin(self.proxy.update_origin)
            .verbose_transport(self.proxy.verbose_transport);

        match self.proxy.transport {
            TransportKind::Hyper => options,
            TransportKind::Reqwest => options.transport(ReqwestTransport::new()),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Upstream configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Absolute http(s) origin to forward to (e.g., "http://localhost:9090").
    pub target: String,

    /// Log proxy creation and every forwarded URL.
    pub log: bool,

    /// Rewrite an inbound `origin` header to the target origin.
    pub update_origin: bool,

    /// Log outbound requests and upstream responses in detail.
    pub verbose_transport: bool,

    /// HTTP client used for the upstream call.
    pub transport: TransportKind,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            log: false,
            update_origin: true,
            verbose_transport: false,
            transport: TransportKind::default(),
        }
    }
}

/// Upstream HTTP client selection.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// hyper-util client, plain http only.
    #[default]
    Hyper,
    /// reqwest client, http and https.
    Reqwest,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
