//! RabbitMQ SSL listener attributes.
//!
//! SSL settings are emitted as a group: either all of them (port,
//! verification, peer certificate enforcement and the three PEM paths) or
//! only `ssl = false`.

use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Directory holding the broker's PEM files.
pub const SSL_DIR: &str = "/etc/rabbitmq/ssl";

/// TLS port for AMQP.
pub const SSL_PORT: u16 = 5671;

pub const SSL_VERIFY: &str = "verify_peer";

/// Group owning the PEM files.
pub const SSL_FILE_GROUP: &str = "rabbitmq";

/// Mode of the PEM files.
pub const SSL_FILE_MODE: u32 = 0o640;

/// Attribute namespace the SSL attributes are merged into.
pub const ATTRIBUTE_NAMESPACE: &str = "rabbitmq";

/// One of the three PEM files the broker needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SslFile {
    CaCert,
    Cert,
    Key,
}

impl SslFile {
    pub const ALL: [SslFile; 3] = [SslFile::CaCert, SslFile::Cert, SslFile::Key];

    /// Key of this file's content under `ssl.server` in the data bag.
    pub fn key(&self) -> &'static str {
        match self {
            SslFile::CaCert => "cacert",
            SslFile::Cert => "cert",
            SslFile::Key => "key",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            SslFile::CaCert => "cacert.pem",
            SslFile::Cert => "cert.pem",
            SslFile::Key => "key.pem",
        }
    }

    /// Absolute path of this file under [`SSL_DIR`].
    pub fn path(&self) -> PathBuf {
        Path::new(SSL_DIR).join(self.file_name())
    }

    fn path_string(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }
}

/// Settings present only when SSL is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SslSettings {
    #[serde(rename = "ssl_port")]
    pub port: u16,
    #[serde(rename = "ssl_verify")]
    pub verify: &'static str,
    #[serde(rename = "ssl_fail_if_no_peer_cert")]
    pub fail_if_no_peer_cert: bool,
    #[serde(rename = "ssl_cacert")]
    pub cacert: String,
    #[serde(rename = "ssl_cert")]
    pub cert: String,
    #[serde(rename = "ssl_key")]
    pub key: String,
}

/// Attribute overrides for the `rabbitmq` namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SslAttributes {
    #[serde(rename = "ssl")]
    enabled: bool,
    #[serde(flatten)]
    settings: Option<SslSettings>,
}

impl SslAttributes {
    pub fn derive(use_ssl: bool) -> Self {
        if !use_ssl {
            return Self {
                enabled: false,
                settings: None,
            };
        }
        Self {
            enabled: true,
            settings: Some(SslSettings {
                port: SSL_PORT,
                verify: SSL_VERIFY,
                fail_if_no_peer_cert: true,
                cacert: SslFile::CaCert.path_string(),
                cert: SslFile::Cert.path_string(),
                key: SslFile::Key.path_string(),
            }),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn settings(&self) -> Option<&SslSettings> {
        self.settings.as_ref()
    }

    /// Number of attributes this override sets.
    pub fn attribute_count(&self) -> usize {
        self.entries().len()
    }

    /// Attribute name/value pairs, in a stable order.
    pub fn entries(&self) -> Vec<(&'static str, Value)> {
        let mut entries = vec![("ssl", Value::Bool(self.enabled))];
        if let Some(s) = &self.settings {
            entries.push(("ssl_port", json!(s.port)));
            entries.push(("ssl_verify", json!(s.verify)));
            entries.push(("ssl_fail_if_no_peer_cert", json!(s.fail_if_no_peer_cert)));
            entries.push(("ssl_cacert", json!(s.cacert)));
            entries.push(("ssl_cert", json!(s.cert)));
            entries.push(("ssl_key", json!(s.key)));
        }
        entries
    }

    /// Render as `{"rabbitmq": {...}}` for merging into an attribute tree.
    pub fn to_attribute_tree(&self) -> Value {
        let inner: serde_json::Map<String, Value> = self
            .entries()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        json!({ ATTRIBUTE_NAMESPACE: inner })
    }
}
