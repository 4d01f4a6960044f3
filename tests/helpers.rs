//! Shared test utilities for sensu-rabbitmq tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use sensu_rabbitmq::policy::{CredentialRecord, RawCredentialRecord, ServiceCredentials};

/// Test environment with a data bag directory and a staging root.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Base directory (project root simulation)
    pub base_dir: PathBuf,
    /// data_bags/ directory
    pub data_bags: PathBuf,
    /// Root that apply writes under
    pub staging: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        let data_bags = base_dir.join("data_bags");
        let staging = base_dir.join("output/staging");

        fs::create_dir_all(&data_bags).expect("Failed to create data_bags dir");
        fs::create_dir_all(&staging).expect("Failed to create staging dir");

        Self {
            _temp_dir: temp_dir,
            base_dir,
            data_bags,
            staging,
        }
    }

    /// Write the `sensu` item under data_bags/sensu/.
    pub fn write_sensu_item(&self, content: &str) -> PathBuf {
        let dir = self.data_bags.join("sensu");
        fs::create_dir_all(&dir).expect("Failed to create data bag");
        let path = dir.join("sensu.json");
        fs::write(&path, content).expect("Failed to write data bag item");
        path
    }
}

/// The service-specific credentials the fixtures use.
pub fn server_record() -> CredentialRecord {
    CredentialRecord::new("/server_vhost", "server_user", "server_password", "1 2 3")
}

pub fn server_services() -> Vec<ServiceCredentials> {
    vec![ServiceCredentials::new(
        "server",
        RawCredentialRecord::from(server_record()),
    )]
}

/// A `sensu` data bag item with empty SSL material and server credentials.
pub fn sensu_item() -> String {
    sensu_item_with_pems("", "", "")
}

pub fn sensu_item_with_pems(cacert: &str, cert: &str, key: &str) -> String {
    serde_json::json!({
        "id": "sensu",
        "ssl": {
            "client": { "cert": "", "key": "" },
            "server": { "cert": cert, "key": key, "cacert": cacert }
        },
        "config": {},
        "enterprise": {},
        "server": {
            "rabbitmq": {
                "vhost": "/server_vhost",
                "user": "server_user",
                "password": "server_password",
                "permissions": "1 2 3"
            }
        }
    })
    .to_string()
}

pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist: {}", path.display());
}

pub fn assert_file_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    let actual = fs::metadata(path)
        .unwrap_or_else(|e| panic!("stat {}: {}", path.display(), e))
        .permissions()
        .mode()
        & 0o777;
    assert_eq!(actual, mode, "{} has mode {:o}", path.display(), actual);
}
