//! sensu-rabbitmq - resolves and stages the RabbitMQ side of a Sensu node.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use commands::Node;
use sensu_rabbitmq::config::Config;

#[derive(Parser)]
#[command(name = "sensu-rabbitmq")]
#[command(about = "Sensu RabbitMQ provisioning policy")]
#[command(
    after_help = "QUICK START:\n  sensu-rabbitmq resolve --platform ubuntu --platform-version 12.04\n  sensu-rabbitmq plan --platform redhat --platform-version 6.6 --use-ssl true\n  sensu-rabbitmq apply --platform redhat --platform-version 6.6 --use-ssl true"
)]
struct Cli {
    /// Directory holding .env and the default data_bags/ and output/ dirs
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct NodeArgs {
    /// Platform name as reported by the node (ubuntu, debian, redhat, centos, ...)
    #[arg(long)]
    platform: String,

    /// Platform version as reported by the node (e.g. 12.04, 5.10)
    #[arg(long)]
    platform_version: String,

    /// Enable the SSL listener (overrides SENSU_USE_SSL)
    #[arg(long)]
    use_ssl: Option<bool>,

    /// Install Erlang Solutions' erlang (overrides SENSU_USE_ESL_ERLANG)
    #[arg(long)]
    use_esl_erlang: Option<bool>,

    /// Data bag directory (overrides SENSU_DATA_BAG_DIR)
    #[arg(long)]
    data_bags: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved policy as JSON
    Resolve(NodeArgs),

    /// Print the operations the node needs
    Plan(NodeArgs),

    /// Write the SSL files under the staging root
    Apply {
        #[command(flatten)]
        node: NodeArgs,

        /// Staging root (overrides SENSU_STAGING_DIR)
        #[arg(long)]
        root: Option<PathBuf>,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
    /// Show services with rabbitmq credentials in the data bag
    Services,
}

fn node_from(args: NodeArgs, config: &mut Config) -> Node {
    if let Some(dir) = args.data_bags {
        config.data_bag_dir = dir;
    }
    Node {
        flags: config.flags_with(args.use_ssl, args.use_esl_erlang),
        platform: args.platform,
        version: args.platform_version,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let mut config = Config::load(&base_dir);

    match cli.command {
        Commands::Resolve(args) => {
            let node = node_from(args, &mut config);
            commands::cmd_resolve(&config, &node)?;
        }

        Commands::Plan(args) => {
            let node = node_from(args, &mut config);
            commands::cmd_plan(&config, &node)?;
        }

        Commands::Apply { node, root } => {
            let node = node_from(node, &mut config);
            if let Some(root) = root {
                config.staging_dir = root;
            }
            commands::cmd_apply(&config, &node)?;
        }

        Commands::Show { what } => {
            let show_target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
                ShowTarget::Services => commands::show::ShowTarget::Services,
            };
            commands::cmd_show(show_target, &config)?;
        }
    }

    Ok(())
}
