//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `resolve` - Print the resolved policy as JSON
//! - `plan` - Print the desired-state operations
//! - `apply` - Materialize files under the staging root
//! - `show` - Display information

pub mod apply;
pub mod plan;
pub mod resolve;
pub mod show;

pub use apply::cmd_apply;
pub use plan::cmd_plan;
pub use resolve::cmd_resolve;
pub use show::cmd_show;

use anyhow::{Context, Result};

use sensu_rabbitmq::config::Config;
use sensu_rabbitmq::data_bag::{self, SensuDataBag};
use sensu_rabbitmq::policy::{self, FeatureFlags, ResolutionResult};

/// The node a command runs for.
#[derive(Debug, Clone)]
pub struct Node {
    pub platform: String,
    pub version: String,
    pub flags: FeatureFlags,
}

/// Load the data bag and resolve the policy for `node`.
pub(crate) fn resolve_node(config: &Config, node: &Node) -> Result<(ResolutionResult, SensuDataBag)> {
    // stderr, so `resolve` output stays valid JSON
    eprintln!("Resolving policy for {} {}...", node.platform, node.version);
    let bag = data_bag::load_item(&config.data_bag_dir)?;
    let result = policy::resolve_node(
        &node.platform,
        &node.version,
        &node.flags,
        &bag.service_credentials(),
    )
    .with_context(|| format!("Cannot provision {} {}", node.platform, node.version))?;
    Ok((result, bag))
}
