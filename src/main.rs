use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "delivery-price")]
#[command(
    version,
    about = "Update subscription delivery prices on PayWhirl",
    long_about = "Update subscription delivery prices on PayWhirl.\n\n\
                  Without --batch, prompts for a single subscription ID and price. \
                  Every attempted change is appended to a CSV audit log.\n\n\
                  Requires PAYWHIRL_API_TOKEN in the environment (or in a .env file)."
)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to a CSV file with subscription_id and new_delivery_price columns
    #[arg(long)]
    pub batch: Option<PathBuf>,

    /// Skip the per-record confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file (defaults to ./delivery-price.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Audit log location. Overrides the config file; defaults to logs/audit.csv
    #[arg(long, global = true)]
    pub audit_log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the most recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        last: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    delivery_price::logging::init(cli.verbose);

    match &cli.command {
        Some(Commands::Audit { last }) => cmd::cmd_audit(&cli, *last)?,
        None => match cli.batch.as_deref() {
            Some(batch_file) => cmd::run_batch(&cli, batch_file).await?,
            None => cmd::run_single(&cli).await?,
        },
    }

    Ok(())
}
