//! Erlang runtime package selection.
//!
//! | family | major | use_esl_erlang | esl-erlang | standard |
//! |--------|-------|----------------|------------|----------|
//! | debian | any   | false          | no         | yes      |
//! | debian | any   | true           | yes        | yes      |
//! | rhel   | <= 5  | any            | no         | yes      |
//! | rhel   | >= 6  | false          | no         | yes      |
//! | rhel   | >= 6  | true           | yes        | yes      |

use serde::Serialize;

use crate::platform::{PlatformDescriptor, PlatformFamily};

/// Erlang Solutions' packaged runtime.
pub const ESL_ERLANG: &str = "esl-erlang";

/// Distribution runtime on Debian derivatives.
pub const DEBIAN_ERLANG: &str = "erlang-nox";

/// Distribution runtime on Red Hat derivatives.
pub const RHEL_ERLANG: &str = "erlang";

/// A package and whether it should be installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSelection {
    pub name: &'static str,
    pub install: bool,
}

/// Name of the distribution's own erlang runtime package.
pub fn standard_erlang(family: PlatformFamily) -> &'static str {
    match family {
        PlatformFamily::Debian => DEBIAN_ERLANG,
        PlatformFamily::Rhel => RHEL_ERLANG,
    }
}

/// Select the erlang runtime packages.
///
/// Always returns the enterprise entry first and the standard entry second.
/// The standard runtime is always installed.
pub fn select_erlang(platform: &PlatformDescriptor, use_esl_erlang: bool) -> Vec<PackageSelection> {
    vec![
        PackageSelection {
            name: ESL_ERLANG,
            install: use_esl_erlang && platform.supports_esl_erlang(),
        },
        PackageSelection {
            name: standard_erlang(platform.family),
            install: true,
        },
    ]
}
