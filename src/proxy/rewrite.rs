//! Outbound URL and header rewriting.
//!
//! # Responsibilities
//! - Re-form the absolute inbound URL from a server-side request head
//! - Point that URL at the target's hostname and port
//! - Rewrite `host` (always) and `origin` (when enabled) to the target
//!
//! # Design Decisions
//! - Scheme, path and query of the inbound URL are kept as-is, only
//!   hostname and port come from the target
//! - A target without an explicit port clears the inbound port

use std::str::FromStr;

use axum::http::{header, request::Parts, uri::Authority, HeaderMap};
use url::Url;

use super::target::Target;

/// Scheme assumed for origin-form request URIs (`/path?query`).
const DEFAULT_INBOUND_SCHEME: &str = "http";

/// Host assumed when the inbound request carries neither an absolute URI
/// nor a usable `host` header (HTTP/1.0 clients, malformed headers).
const FALLBACK_HOST: &str = "localhost";

/// Host and port of an authority. Userinfo is never carried over.
fn host_and_port(authority: &Authority) -> (String, Option<u16>) {
    (authority.host().to_string(), authority.port_u16())
}

/// The `host` header as a bare `host[:port]`, or `None` when it carries
/// userinfo or anything beyond an authority.
fn host_header(headers: &HeaderMap) -> Option<(String, Option<u16>)> {
    let value = headers.get(header::HOST)?.to_str().ok()?;
    if value.is_empty() || value.contains('@') {
        return None;
    }
    let authority = Authority::from_str(value).ok()?;
    Some(host_and_port(&authority))
}

/// Re-form the absolute URL the client addressed.
///
/// Path and query always come from the request URI, never from `host`.
pub fn inbound_url(parts: &Parts) -> Result<Url, url::ParseError> {
    let uri = &parts.uri;
    let scheme = uri.scheme_str().unwrap_or(DEFAULT_INBOUND_SCHEME);
    let (host, port) = uri
        .authority()
        .map(host_and_port)
        .or_else(|| host_header(&parts.headers))
        .unwrap_or_else(|| (FALLBACK_HOST.to_string(), None));

    let mut url = match port {
        Some(port) => Url::parse(&format!("{scheme}://{host}:{port}/"))?,
        None => Url::parse(&format!("{scheme}://{host}/"))?,
    };
    url.set_path(uri.path());
    url.set_query(uri.query());
    Ok(url)
}

/// Replace hostname and port of `inbound` with the target's.
pub fn rewrite_url(inbound: &Url, target: &Target) -> Result<Url, url::ParseError> {
    let mut url = inbound.clone();
    url.set_host(Some(target.hostname()))?;
    url.set_port(target.port())
        .map_err(|()| url::ParseError::EmptyHost)?;
    Ok(url)
}

/// Point `host` at the target, and `origin` too when `update_origin` is set.
pub fn normalize_headers(headers: &mut HeaderMap, target: &Target, update_origin: bool) {
    headers.insert(header::HOST, target.host_header().clone());

    if update_origin && headers.contains_key(header::ORIGIN) {
        headers.insert(header::ORIGIN, target.origin_header().clone());
    }
}
