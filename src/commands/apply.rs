//! Apply command - materializes the SSL files under the staging root.

use anyhow::{Context, Result};
use std::fs;

use super::Node;
use sensu_rabbitmq::component::{self, executor};
use sensu_rabbitmq::config::Config;
use sensu_rabbitmq::policy::SslFile;

/// Execute the apply command.
pub fn cmd_apply(config: &Config, node: &Node) -> Result<()> {
    let (result, bag) = super::resolve_node(config, node)?;
    let plan = component::build_plan(&result, &bag);

    fs::create_dir_all(&config.staging_dir).with_context(|| {
        format!(
            "Failed to create staging directory: {}",
            config.staging_dir.display()
        )
    })?;
    let ctx = executor::ApplyContext::new(&config.staging_dir);

    if result.ssl.enabled() {
        for file in SslFile::ALL {
            if bag.server_pem(file).is_empty() {
                println!("  Warning: ssl.server.{} is empty in the data bag", file.key());
            }
        }
    }

    let report = executor::execute_plan(&ctx, &plan)?;
    println!();
    report.print();
    if report.converged() {
        println!("Staging root already up to date.");
    }
    Ok(())
}
