//! Declarative desired state for a node.
//!
//! A [`ResolutionResult`](crate::policy::ResolutionResult) says WHAT the node
//! should look like. This module turns it into a flat list of operations,
//! grouped into components, that external collaborators apply:
//!
//! ```text
//! Component (DATA)                      Collaborator
//! ─────────────────────────────         ───────────────────────
//! erlang      [Package, Package]   →    package manager
//! ssl         [Dir, File, File, File] → file materializer (executor)
//! credentials [Vhost, BrokerUser, ...] → broker administration
//! ```
//!
//! Every op is idempotent on the collaborator side: applying the same list
//! twice leaves the node unchanged the second time.

pub mod builder;
pub mod executor;

pub use builder::build_plan;

use std::fmt;
use std::path::PathBuf;

/// Phases determine component ordering.
///
/// Packages come first so the `rabbitmq` group exists before the SSL
/// files are handed to it, and files come before the broker is touched
/// so the listener starts with its certificates in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Phase {
    /// Erlang runtime packages.
    Packages = 1,
    /// SSL directory and PEM files.
    Files = 2,
    /// Vhosts and users.
    Broker = 3,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Packages => write!(f, "Packages"),
            Phase::Files => write!(f, "Files"),
            Phase::Broker => write!(f, "Broker"),
        }
    }
}

/// A string that must not show up in logs or error chains.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(<{} bytes>)", self.0.len())
    }
}

/// A single desired-state operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    // ─────────────────────────────────────────────────────────────────────
    // Package manager
    // ─────────────────────────────────────────────────────────────────────
    /// Install the package, or leave it alone when `install` is false.
    Package { name: &'static str, install: bool },

    // ─────────────────────────────────────────────────────────────────────
    // File materialization
    // ─────────────────────────────────────────────────────────────────────
    /// Ensure a directory exists.
    Dir { path: PathBuf, recursive: bool },

    /// Ensure a file exists with exactly this content, group and mode.
    File {
        path: PathBuf,
        group: &'static str,
        mode: u32,
        content: Secret,
    },

    // ─────────────────────────────────────────────────────────────────────
    // Broker administration
    // ─────────────────────────────────────────────────────────────────────
    /// Ensure a vhost exists.
    Vhost(String),

    /// Ensure a user exists with this password and permissions on `vhost`.
    BrokerUser {
        name: String,
        password: Secret,
        vhost: String,
        permissions: String,
    },
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Package { name, install: true } => write!(f, "install package {}", name),
            Op::Package {
                name,
                install: false,
            } => write!(f, "skip package {}", name),
            Op::Dir { path, recursive } => {
                write!(f, "directory {}", path.display())?;
                if *recursive {
                    write!(f, " (recursive)")?;
                }
                Ok(())
            }
            Op::File {
                path, group, mode, ..
            } => write!(f, "file {} (group {}, mode {:04o})", path.display(), group, mode),
            Op::Vhost(name) => write!(f, "vhost {}", name),
            Op::BrokerUser {
                name,
                vhost,
                permissions,
                ..
            } => write!(f, "user {} on {} ({})", name, vhost, permissions),
        }
    }
}

/// A named group of ops applied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Human-readable name for logging.
    pub name: &'static str,
    pub phase: Phase,
    pub ops: Vec<Op>,
}

/// Components in phase order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub components: Vec<Component>,
}

impl Plan {
    /// All ops in application order.
    pub fn ops(&self) -> impl Iterator<Item = &Op> {
        self.components.iter().flat_map(|c| c.ops.iter())
    }

    /// Print the plan, one op per line.
    pub fn print(&self) {
        for component in &self.components {
            println!("[{}] {}", component.phase, component.name);
            for op in &component.ops {
                println!("  {}", op);
            }
        }
    }
}
