use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use slotbridge::config::{Config, ConfigStore};
use slotbridge::logging::init_tracing;
use slotbridge::replay::{run_scenario, Scenario};

#[derive(Parser)]
#[command(name = "slotbridge")]
#[command(about = "Inventory drag-and-drop reconciliation tools", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/slotbridge/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a JSON scenario against a scripted authority
    Replay {
        scenario: PathBuf,

        /// Pretty-print the resulting inventories
        #[arg(long)]
        pretty: bool,
    },
    /// Validate the config file and print the effective settings
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let config = ConfigStore::open(config_path.clone())
        .with_context(|| format!("loading {}", config_path.display()))?;

    match cli.command {
        Command::Replay { scenario, pretty } => {
            let scenario = Scenario::from_path(&scenario)?;
            let report = run_scenario(scenario, config).await;
            let output = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{output}");
        }
        Command::CheckConfig => {
            let effective = toml::to_string_pretty(&config.get())
                .context("serializing effective config")?;
            println!("# {}", config.path().display());
            print!("{effective}");
        }
    }

    Ok(())
}
