//! Broker credentials: the default `sensu` record plus service-specific
//! records sourced from the secret store.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PolicyError;

pub const DEFAULT_VHOST: &str = "sensu";
pub const DEFAULT_USER: &str = "sensu";
pub const DEFAULT_PASSWORD: &str = "password";

/// Configure, write and read patterns that match everything.
pub const DEFAULT_PERMISSIONS: &str = ".* .* .*";

/// A vhost, a user on it, and that user's permission triple.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CredentialRecord {
    pub vhost: String,
    pub user: String,
    pub password: String,
    /// Space separated configure/write/read patterns.
    pub permissions: String,
}

impl CredentialRecord {
    pub fn new(vhost: &str, user: &str, password: &str, permissions: &str) -> Self {
        Self {
            vhost: vhost.to_string(),
            user: user.to_string(),
            password: password.to_string(),
            permissions: permissions.to_string(),
        }
    }

    /// The record every node gets regardless of flags.
    pub fn default_record() -> Self {
        Self::new(
            DEFAULT_VHOST,
            DEFAULT_USER,
            DEFAULT_PASSWORD,
            DEFAULT_PERMISSIONS,
        )
    }

    /// Split the permission string into configure, write and read patterns.
    ///
    /// Returns None when the string does not hold exactly three patterns.
    pub fn permission_patterns(&self) -> Option<[&str; 3]> {
        let mut parts = self.permissions.split_whitespace();
        let triple = [parts.next()?, parts.next()?, parts.next()?];
        if parts.next().is_some() {
            return None;
        }
        Some(triple)
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("vhost", &self.vhost)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("permissions", &self.permissions)
            .finish()
    }
}

impl fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "user '{}' on vhost '{}' ({})",
            self.user, self.vhost, self.permissions
        )
    }
}

/// A credential record as it appears in the secret store, before the
/// required fields have been checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RawCredentialRecord {
    pub vhost: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub permissions: Option<String>,
}

impl RawCredentialRecord {
    /// Check that every field is present.
    ///
    /// `source_name` names the record's origin in the error.
    pub fn validate(self, source_name: &str) -> Result<CredentialRecord, PolicyError> {
        let missing = |field: &'static str| PolicyError::InvalidCredentialRecord {
            source_name: source_name.to_string(),
            field,
        };
        Ok(CredentialRecord {
            vhost: self.vhost.ok_or_else(|| missing("vhost"))?,
            user: self.user.ok_or_else(|| missing("user"))?,
            password: self.password.ok_or_else(|| missing("password"))?,
            permissions: self.permissions.ok_or_else(|| missing("permissions"))?,
        })
    }
}

impl From<CredentialRecord> for RawCredentialRecord {
    fn from(record: CredentialRecord) -> Self {
        Self {
            vhost: Some(record.vhost),
            user: Some(record.user),
            password: Some(record.password),
            permissions: Some(record.permissions),
        }
    }
}
