//! Configuration management for sensu-rabbitmq.
//!
//! Reads configuration from a .env file and environment variables.
//! Environment variables take precedence over the .env file, and CLI
//! flags take precedence over both.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::policy::FeatureFlags;

/// Environment keys.
pub const DATA_BAG_DIR_KEY: &str = "SENSU_DATA_BAG_DIR";
pub const STAGING_DIR_KEY: &str = "SENSU_STAGING_DIR";
pub const USE_SSL_KEY: &str = "SENSU_USE_SSL";
pub const USE_ESL_ERLANG_KEY: &str = "SENSU_USE_ESL_ERLANG";

/// sensu-rabbitmq configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory searched for the `sensu` data bag item.
    pub data_bag_dir: PathBuf,
    /// Root that `apply` materializes files under.
    pub staging_dir: PathBuf,
    /// Flag defaults, overridable per invocation.
    pub flags: FeatureFlags,
}

impl Config {
    /// Load configuration from .env file and environment.
    ///
    /// The .env file is looked up in `base_dir`.
    pub fn load(base_dir: &Path) -> Self {
        let mut env_vars = HashMap::new();

        let env_path = base_dir.join(".env");
        if env_path.exists() {
            match dotenvy::from_path_iter(&env_path) {
                Ok(iter) => {
                    for item in iter {
                        match item {
                            Ok((key, value)) => {
                                env_vars.insert(key, value);
                            }
                            Err(e) => {
                                eprintln!("  Warning: skipping line in {}: {}", env_path.display(), e)
                            }
                        }
                    }
                }
                Err(e) => eprintln!("  Warning: failed to read {}: {}", env_path.display(), e),
            }
        }

        // Environment variables override .env file
        for (key, value) in std::env::vars() {
            env_vars.insert(key, value);
        }

        Self::from_vars(base_dir, &env_vars)
    }

    /// Build config from an already merged variable map.
    pub fn from_vars(base_dir: &Path, vars: &HashMap<String, String>) -> Self {
        let resolve_path = |s: &String| {
            let path = PathBuf::from(s);
            if path.is_absolute() {
                path
            } else {
                base_dir.join(path)
            }
        };

        let data_bag_dir = vars
            .get(DATA_BAG_DIR_KEY)
            .map(resolve_path)
            .unwrap_or_else(|| default_data_bag_dir(base_dir));

        let staging_dir = vars
            .get(STAGING_DIR_KEY)
            .map(resolve_path)
            .unwrap_or_else(|| base_dir.join("output/staging"));

        let flags = FeatureFlags {
            use_ssl: parse_flag(USE_SSL_KEY, vars.get(USE_SSL_KEY)),
            use_esl_erlang: parse_flag(USE_ESL_ERLANG_KEY, vars.get(USE_ESL_ERLANG_KEY)),
        };

        Self {
            data_bag_dir,
            staging_dir,
            flags,
        }
    }

    /// Apply per-invocation overrides on top of the configured flags.
    pub fn flags_with(&self, use_ssl: Option<bool>, use_esl_erlang: Option<bool>) -> FeatureFlags {
        FeatureFlags {
            use_ssl: use_ssl.unwrap_or(self.flags.use_ssl),
            use_esl_erlang: use_esl_erlang.unwrap_or(self.flags.use_esl_erlang),
        }
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  {}: {}", DATA_BAG_DIR_KEY, self.data_bag_dir.display());
        println!("  {}: {}", STAGING_DIR_KEY, self.staging_dir.display());
        println!("  {}: {}", USE_SSL_KEY, self.flags.use_ssl);
        println!("  {}: {}", USE_ESL_ERLANG_KEY, self.flags.use_esl_erlang);
        if self.data_bag_dir.is_dir() {
            println!("  Data bags: FOUND");
        } else {
            println!("  Data bags: NOT FOUND");
        }
    }
}

/// `<base>/data_bags`, falling back to `~/.config/sensu/data_bags`.
fn default_data_bag_dir(base_dir: &Path) -> PathBuf {
    let local = base_dir.join("data_bags");
    if local.is_dir() {
        return local;
    }
    match dirs::config_dir() {
        Some(dir) => {
            let user = dir.join("sensu/data_bags");
            if user.is_dir() {
                user
            } else {
                local
            }
        }
        None => local,
    }
}

/// Unset means false. Unrecognised values warn and count as false.
fn parse_flag(key: &str, value: Option<&String>) -> bool {
    let Some(value) = value else {
        return false;
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "" | "0" | "false" | "no" | "off" => false,
        other => {
            eprintln!("  Warning: {}={} is not a boolean, using false", key, other);
            false
        }
    }
}
