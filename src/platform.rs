//! Target platform classification.
//!
//! Nodes report a platform name ("ubuntu", "redhat") and a version string
//! ("12.04", "5.10"). Everything downstream only needs the family and the
//! major version, so the strings are classified once here.

use serde::Serialize;
use std::fmt;

use crate::error::PolicyError;

/// Platform names handled as Debian derivatives.
const DEBIAN_PLATFORMS: &[&str] = &["debian", "ubuntu", "linuxmint", "raspbian"];

/// Platform names handled as Red Hat derivatives.
const RHEL_PLATFORMS: &[&str] = &[
    "redhat",
    "centos",
    "scientific",
    "oracle",
    "rocky",
    "almalinux",
    "amazon",
];

/// Oldest Red Hat major version the Erlang Solutions repository serves.
pub const RHEL_MIN_ESL_MAJOR: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    Debian,
    Rhel,
}

impl PlatformFamily {
    /// Classify a platform name. Matching is case-insensitive.
    pub fn from_platform(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        if DEBIAN_PLATFORMS.contains(&name.as_str()) {
            Some(PlatformFamily::Debian)
        } else if RHEL_PLATFORMS.contains(&name.as_str()) {
            Some(PlatformFamily::Rhel)
        } else {
            None
        }
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformFamily::Debian => write!(f, "debian"),
            PlatformFamily::Rhel => write!(f, "rhel"),
        }
    }
}

/// Family and major version of the node being provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PlatformDescriptor {
    pub family: PlatformFamily,
    pub major_version: u32,
}

impl PlatformDescriptor {
    pub const fn new(family: PlatformFamily, major_version: u32) -> Self {
        Self {
            family,
            major_version,
        }
    }

    /// Build a descriptor from the platform name and version a node reports.
    ///
    /// Fails with `UnsupportedPlatform` when the name belongs to neither
    /// family, or when a Red Hat version has no leading integer (the major
    /// decides ESL support there). Debian versions such as `bookworm/sid`
    /// map to major 0.
    pub fn parse(platform: &str, version: &str) -> Result<Self, PolicyError> {
        let family = PlatformFamily::from_platform(platform)
            .ok_or_else(|| PolicyError::unsupported(platform, version, "unknown platform family"))?;
        let major_version = match (family, parse_major_version(version)) {
            (_, Some(major)) => major,
            (PlatformFamily::Debian, None) => 0,
            (PlatformFamily::Rhel, None) => {
                return Err(PolicyError::unsupported(
                    platform,
                    version,
                    "version has no numeric major component",
                ))
            }
        };
        Ok(Self::new(family, major_version))
    }

    /// Whether the Erlang Solutions package repository serves this platform.
    ///
    /// RHEL 5 (and anything older) is not served; the enterprise flag
    /// degrades to a no-op there rather than failing the run.
    pub fn supports_esl_erlang(&self) -> bool {
        match self.family {
            PlatformFamily::Debian => true,
            PlatformFamily::Rhel => self.major_version >= RHEL_MIN_ESL_MAJOR,
        }
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.family, self.major_version)
    }
}

/// Extract the leading integer of a dotted version string.
fn parse_major_version(version: &str) -> Option<u32> {
    let major = version.trim().split('.').next()?;
    if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    major.parse().ok()
}
