//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Target checks reuse the proxy's own parser, so a config that
//!   validates always builds a proxy

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::proxy::{InvalidTarget, Target};

/// A single semantic problem in a [`ProxyConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("proxy.target is required")]
    MissingTarget,

    #[error("proxy.target: {0}")]
    InvalidTarget(#[from] InvalidTarget),

    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.proxy.target.trim().is_empty() {
        errors.push(ValidationError::MissingTarget);
    } else if let Err(e) = Target::parse(&config.proxy.target) {
        errors.push(e.into());
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if tracing::Level::from_str(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
