//! The `sensu` data bag item: SSL material and service credentials.
//!
//! Expected shape:
//!
//! ```text
//! {
//!   "ssl":        { "client": {cert, key}, "server": {cert, key, cacert} },
//!   "config":     { ... },
//!   "enterprise": { ... },
//!   "server":     { "rabbitmq": {vhost, user, password, permissions} },
//!   "api":        { "rabbitmq": {...} },
//!   "client":     { "rabbitmq": {...} }
//! }
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::policy::{RawCredentialRecord, ServiceCredentials, SslFile};

/// Data bag item id holding everything this crate reads.
pub const SENSU_ITEM: &str = "sensu";

/// Services that may carry their own rabbitmq credentials, in provisioning order.
pub const SERVICES: &[&str] = &["client", "server", "api"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientSsl {
    pub cert: String,
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSsl {
    pub cert: String,
    pub key: String,
    pub cacert: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SslSecrets {
    pub client: ClientSsl,
    pub server: ServerSsl,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceSection {
    pub rabbitmq: Option<RawCredentialRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SensuDataBag {
    pub id: Option<String>,
    pub ssl: SslSecrets,
    pub config: serde_json::Map<String, serde_json::Value>,
    pub enterprise: serde_json::Map<String, serde_json::Value>,
    pub client: Option<ServiceSection>,
    pub server: Option<ServiceSection>,
    pub api: Option<ServiceSection>,
}

impl SensuDataBag {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid sensu data bag item")
    }

    /// PEM content the broker listener uses for `file`.
    pub fn server_pem(&self, file: SslFile) -> &str {
        match file {
            SslFile::CaCert => &self.ssl.server.cacert,
            SslFile::Cert => &self.ssl.server.cert,
            SslFile::Key => &self.ssl.server.key,
        }
    }

    fn service(&self, name: &str) -> Option<&ServiceSection> {
        match name {
            "client" => self.client.as_ref(),
            "server" => self.server.as_ref(),
            "api" => self.api.as_ref(),
            _ => None,
        }
    }

    /// Credential records of every service with a `rabbitmq` section.
    ///
    /// Records are returned unvalidated; the resolver checks the fields.
    pub fn service_credentials(&self) -> Vec<ServiceCredentials> {
        SERVICES
            .iter()
            .filter_map(|name| {
                let record = self.service(name)?.rabbitmq.clone()?;
                Some(ServiceCredentials::new(name, record))
            })
            .collect()
    }
}

/// Locate the `<item>.json` item of the `sensu` bag.
///
/// Lookup order: `<dir>/sensu/<item>.json`, then `<dir>/<item>.json`.
/// Failing both, the tree is searched and exactly one match is required,
/// so an item with the same name in another bag can never shadow it.
pub fn find_item(dir: &Path, item: &str) -> Result<PathBuf> {
    if !dir.is_dir() {
        bail!("Data bag directory not found: {}", dir.display());
    }
    let file_name = format!("{}.json", item);

    for candidate in [dir.join(SENSU_ITEM).join(&file_name), dir.join(&file_name)] {
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    let mut matches = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read {}", dir.display()))?;
        if entry.file_type().is_file() && entry.file_name() == file_name.as_str() {
            matches.push(entry.into_path());
        }
    }
    match matches.len() {
        0 => bail!("Data bag item '{}' not found in {}", item, dir.display()),
        1 => Ok(matches.remove(0)),
        _ => {
            let found: Vec<String> = matches.iter().map(|p| p.display().to_string()).collect();
            bail!(
                "Data bag item '{}' is ambiguous in {}: {}",
                item,
                dir.display(),
                found.join(", ")
            )
        }
    }
}

/// Load the `sensu` item from a data bag directory.
pub fn load_item(dir: &Path) -> Result<SensuDataBag> {
    let path = find_item(dir, SENSU_ITEM)?;
    let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    SensuDataBag::from_json(&content).with_context(|| format!("in {}", path.display()))
}
