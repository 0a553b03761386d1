//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SendConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::SendConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("connect_timeout_secs must be greater than 0")]
    ZeroConnectTimeout,

    #[error("max_response_size must be greater than 0")]
    ZeroMaxResponseSize,

    #[error("proxy {0:?} is not a host:port address")]
    InvalidProxy(String),

    #[error("log_level {0:?} is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

pub fn validate_config(config: &SendConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroConnectTimeout);
    }
    if config.max_response_size == 0 {
        errors.push(ValidationError::ZeroMaxResponseSize);
    }
    if let Some(proxy) = &config.proxy {
        if !is_host_port(proxy) {
            errors.push(ValidationError::InvalidProxy(proxy.clone()));
        }
    }
    if !LOG_LEVELS.contains(&config.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_host_port(address: &str) -> bool {
    match address.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}
