//! Test helpers for executor module tests.

#![cfg(test)]

use std::path::PathBuf;
use tempfile::TempDir;

use super::ApplyContext;
use crate::component::{Component, Op, Phase, Plan, Secret};
use crate::policy::ssl::{SSL_DIR, SSL_FILE_GROUP, SSL_FILE_MODE};
use crate::policy::SslFile;

/// Temporary staging root.
pub struct TestEnv {
    /// Kept alive for the lifetime of TestEnv.
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().join("staging");
        std::fs::create_dir_all(&root).expect("Failed to create staging dir");
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn apply_context(&self) -> ApplyContext {
        ApplyContext::new(&self.root)
    }
}

/// A plan holding only the SSL component.
pub fn ssl_plan(cacert: &str, cert: &str, key: &str) -> Plan {
    let mut ops = vec![Op::Dir {
        path: SSL_DIR.into(),
        recursive: true,
    }];
    for (file, content) in SslFile::ALL.into_iter().zip([cacert, cert, key]) {
        ops.push(Op::File {
            path: file.path(),
            group: SSL_FILE_GROUP,
            mode: SSL_FILE_MODE,
            content: Secret::new(content),
        });
    }
    Plan {
        components: vec![Component {
            name: "ssl",
            phase: Phase::Files,
            ops,
        }],
    }
}
