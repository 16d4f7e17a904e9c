//! CLI command implementations.
//!
//! | Module  | Commands handled                          |
//! |---------|-------------------------------------------|
//! | `run`   | default mode: `--batch <csv>` or single   |
//! | `audit` | `Audit`                                   |

pub mod audit;
pub mod run;

pub use audit::cmd_audit;
pub use run::{run_batch, run_single};

use anyhow::{Context, Result};
use delivery_price::config::{CliOverrides, Config};

use super::Cli;

/// Resolve configuration from the config file, environment and CLI flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let overrides = CliOverrides {
        config_file: cli.config.clone(),
        audit_log: cli.audit_log.clone(),
    };
    let config = Config::load(&overrides).context("Failed to load configuration")?;
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}
