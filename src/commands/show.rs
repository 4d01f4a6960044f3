//! Show command - displays information.

use anyhow::Result;

use sensu_rabbitmq::config::Config;
use sensu_rabbitmq::data_bag;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration
    Config,
    /// Show which services carry rabbitmq credentials
    Services,
}

/// Execute the show command.
pub fn cmd_show(target: ShowTarget, config: &Config) -> Result<()> {
    match target {
        ShowTarget::Config => {
            config.print();
        }
        ShowTarget::Services => {
            let bag = data_bag::load_item(&config.data_bag_dir)?;
            let services = bag.service_credentials();
            if services.is_empty() {
                println!("No service-specific rabbitmq credentials.");
            }
            for svc in services {
                println!(
                    "  {}: vhost={} user={}",
                    svc.service,
                    svc.record.vhost.as_deref().unwrap_or("<missing>"),
                    svc.record.user.as_deref().unwrap_or("<missing>")
                );
            }
        }
    }
    Ok(())
}
