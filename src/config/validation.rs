//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route prefixes are rooted and unique
//! - Check backend URLs are absolute http(s) URLs with a host
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("route {index}: prefix is empty")]
    EmptyPrefix { index: usize },

    #[error("route `{prefix}`: prefix must begin with `/`")]
    PrefixNotRooted { prefix: String },

    #[error("route `{prefix}`: invalid backend URL `{url}`: {reason}")]
    InvalidBackend {
        prefix: String,
        url: String,
        reason: String,
    },

    #[error("route `{prefix}`: duplicate prefix")]
    DuplicatePrefix { prefix: String },

    #[error("listener bind address is empty")]
    EmptyBindAddress,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }

    let mut seen = std::collections::HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.prefix.is_empty() {
            errors.push(ValidationError::EmptyPrefix { index });
            continue;
        }
        if !route.prefix.starts_with('/') {
            errors.push(ValidationError::PrefixNotRooted {
                prefix: route.prefix.clone(),
            });
        }
        if !seen.insert(route.prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix {
                prefix: route.prefix.clone(),
            });
        }
        if let Err(reason) = check_backend_url(&route.backend) {
            errors.push(ValidationError::InvalidBackend {
                prefix: route.prefix.clone(),
                url: route.backend.clone(),
                reason,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that a backend URL is absolute, http(s), and has a host.
pub(crate) fn check_backend_url(backend: &str) -> Result<(), String> {
    let parsed = url::Url::parse(backend).map_err(|e| e.to_string())?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme `{other}`")),
    }
    if !parsed.has_host() {
        return Err("missing host".to_string());
    }
    Ok(())
}
