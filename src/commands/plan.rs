//! Plan command - prints the ops a node needs.

use anyhow::Result;

use super::Node;
use sensu_rabbitmq::component;
use sensu_rabbitmq::config::Config;

/// Execute the plan command.
pub fn cmd_plan(config: &Config, node: &Node) -> Result<()> {
    let (result, bag) = super::resolve_node(config, node)?;
    let plan = component::build_plan(&result, &bag);
    println!();
    plan.print();
    println!();
    println!(
        "Attributes: {}",
        serde_json::to_string(&result.ssl.to_attribute_tree())?
    );
    Ok(())
}
