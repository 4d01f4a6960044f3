//! Resolve command - prints the resolved policy as JSON.

use anyhow::Result;

use super::Node;
use sensu_rabbitmq::config::Config;

/// Execute the resolve command.
pub fn cmd_resolve(config: &Config, node: &Node) -> Result<()> {
    let (result, _) = super::resolve_node(config, node)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
