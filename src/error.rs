//! Error types for policy resolution.
//!
//! Both failure kinds are deterministic: resolving the same input again
//! reproduces the same error, so callers must not retry.

use thiserror::Error;

/// Errors produced while resolving the provisioning policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("Unsupported platform '{platform}' (version '{version}'): {reason}")]
    UnsupportedPlatform {
        platform: String,
        version: String,
        reason: String,
    },

    #[error("Invalid rabbitmq credentials for '{source_name}': required field '{field}' is missing")]
    InvalidCredentialRecord {
        /// Where the record came from (e.g. `server` for `server.rabbitmq`).
        source_name: String,
        field: &'static str,
    },
}

impl PolicyError {
    pub(crate) fn unsupported(platform: &str, version: &str, reason: &str) -> Self {
        PolicyError::UnsupportedPlatform {
            platform: platform.to_string(),
            version: version.to_string(),
            reason: reason.to_string(),
        }
    }
}
