//! Provisioning policy for the Sensu RabbitMQ transport.
//!
//! Resolution is a pure function of the target platform, the feature flags
//! and the credential records found in the secret store:
//!
//! ```text
//! (platform, flags, service records)  →  resolve()  →  ResolutionResult
//!                                                      ├─ packages     (erlang runtime)
//!                                                      ├─ ssl          (rabbitmq.* attributes)
//!                                                      └─ credentials  (vhosts/users to ensure)
//! ```
//!
//! Nothing here touches the filesystem or the broker. Applying the result
//! is left to the collaborators in [`crate::component`].

pub mod credentials;
pub mod packages;
pub mod ssl;

pub use credentials::{CredentialRecord, RawCredentialRecord};
pub use packages::PackageSelection;
pub use ssl::{SslAttributes, SslFile};

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::platform::PlatformDescriptor;

/// Boolean switches that shape the resolution. Both default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub use_ssl: bool,
    pub use_esl_erlang: bool,
}

/// Credentials a dependent service (client, server, api) asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceCredentials {
    pub service: String,
    pub record: RawCredentialRecord,
}

impl ServiceCredentials {
    pub fn new(service: &str, record: RawCredentialRecord) -> Self {
        Self {
            service: service.to_string(),
            record,
        }
    }
}

/// Desired state for one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub platform: PlatformDescriptor,
    pub packages: Vec<PackageSelection>,
    pub ssl: SslAttributes,
    /// Default record first, then service records in the order supplied.
    pub credentials: Vec<CredentialRecord>,
}

impl ResolutionResult {
    /// Whether the named package is selected for installation.
    pub fn installs(&self, name: &str) -> bool {
        self.packages.iter().any(|p| p.name == name && p.install)
    }
}

/// Resolve the policy for an already classified platform.
///
/// Every service record is provisioned as given: no merging and no
/// deduplication against the default record, even on a vhost collision.
pub fn resolve(
    platform: &PlatformDescriptor,
    flags: &FeatureFlags,
    services: &[ServiceCredentials],
) -> Result<ResolutionResult, PolicyError> {
    let mut credentials = Vec::with_capacity(services.len() + 1);
    credentials.push(CredentialRecord::default_record());
    for svc in services {
        credentials.push(svc.record.clone().validate(&svc.service)?);
    }

    Ok(ResolutionResult {
        platform: *platform,
        packages: packages::select_erlang(platform, flags.use_esl_erlang),
        ssl: SslAttributes::derive(flags.use_ssl),
        credentials,
    })
}

/// Resolve the policy from the platform name and version a node reports.
pub fn resolve_node(
    platform: &str,
    version: &str,
    flags: &FeatureFlags,
    services: &[ServiceCredentials],
) -> Result<ResolutionResult, PolicyError> {
    let descriptor = PlatformDescriptor::parse(platform, version)?;
    resolve(&descriptor, flags, services)
}
