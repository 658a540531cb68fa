//! Upstream target validation.
//!
//! A target is an absolute origin (`scheme://host[:port]`). It is parsed
//! once when the proxy is built and never re-validated per request.

use std::fmt;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

/// Reasons a target string is rejected at construction time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidTarget {
    /// The string is not an absolute URL (e.g. `example.com`, `localhost`).
    #[error("Invalid target, malformed target url: {0}")]
    Malformed(#[from] url::ParseError),

    /// The URL parsed but its scheme is neither `http` nor `https`.
    #[error("Invalid target, only http and https protocols are supported (got {0:?})")]
    UnsupportedScheme(String),

    /// The URL has no host component.
    #[error("Invalid target, target url has no host")]
    MissingHost,

    /// The host cannot be carried in a `host` header.
    #[error("Invalid target, host {0:?} is not a valid header value")]
    InvalidHost(String),
}

/// A validated upstream origin.
#[derive(Debug, Clone)]
pub struct Target {
    url: Url,
    host_header: HeaderValue,
    origin_header: HeaderValue,
}

impl Target {
    /// Parse and validate a target string.
    pub fn parse(target: &str) -> Result<Self, InvalidTarget> {
        let url = Url::parse(target)?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(InvalidTarget::UnsupportedScheme(other.to_string())),
        }

        let hostname = url.host_str().ok_or(InvalidTarget::MissingHost)?;
        let host = match url.port() {
            Some(port) => format!("{hostname}:{port}"),
            None => hostname.to_string(),
        };
        let origin = url.origin().ascii_serialization();

        let host_header =
            HeaderValue::from_str(&host).map_err(|_| InvalidTarget::InvalidHost(host.clone()))?;
        let origin_header =
            HeaderValue::from_str(&origin).map_err(|_| InvalidTarget::InvalidHost(host.clone()))?;

        Ok(Self {
            url,
            host_header,
            origin_header,
        })
    }

    /// Hostname without port. IPv6 literals keep their brackets.
    pub fn hostname(&self) -> &str {
        // Presence checked in `parse`.
        self.url.host_str().unwrap_or_default()
    }

    /// Explicit port, `None` when absent or equal to the scheme default.
    pub fn port(&self) -> Option<u16> {
        self.url.port()
    }

    /// `http` or `https`.
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// `hostname[:port]`, the value written to the outbound `host` header.
    pub fn host(&self) -> &str {
        self.host_header.to_str().unwrap_or_default()
    }

    /// `scheme://hostname[:port]`, the value written to a rewritten `origin` header.
    pub fn origin(&self) -> &str {
        self.origin_header.to_str().unwrap_or_default()
    }

    pub(crate) fn host_header(&self) -> &HeaderValue {
        &self.host_header
    }

    pub(crate) fn origin_header(&self) -> &HeaderValue {
        &self.origin_header
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.origin())
    }
}
