//! Batch and single-record update commands.

use anyhow::{Context, Result, bail};
use delivery_price::audit::AuditLogger;
use delivery_price::batch::source::is_valid_price;
use delivery_price::batch::{BatchRunner, RecordWorkflow, RunSummary, UpdateRequest, read_batch};
use delivery_price::client::PayWhirlClient;
use delivery_price::gates::{ConfirmationGate, Prompter, TerminalPrompter};
use delivery_price::ui::OperatorUI;
use std::path::Path;

use super::super::Cli;
use super::load_config;

const AUDIT_ABORT: &str = "Run aborted: the audit log could not be written";

/// Update every subscription listed in `batch_file`.
///
/// Credentials and the batch file are checked before any record is touched.
pub async fn run_batch(cli: &Cli, batch_file: &Path) -> Result<()> {
    let config = load_config(cli)?;
    let api_config = config.api_config()?;
    let requests = read_batch(batch_file)?;

    let client = PayWhirlClient::new(&api_config)?;
    let gate = ConfirmationGate::new(cli.yes, Box::new(TerminalPrompter));
    let audit = AuditLogger::new(&config.audit_log);
    let ui = OperatorUI::new();
    let workflow = RecordWorkflow::new(&client, &gate, &audit, ui);

    ui.print_batch_start(requests.len());
    let report = BatchRunner::new(config.throttle)
        .run(&requests, &workflow)
        .await
        .context(AUDIT_ABORT)?;

    ui.print_lines(&RunSummary::new(&report.outcomes).lines("Batch Summary"));
    Ok(())
}

/// Prompt for one subscription ID and price, then update it.
pub async fn run_single(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let api_config = config.api_config()?;
    let ui = OperatorUI::new();

    // A closed stdin reads as an empty answer, which cancels.
    let prompter = TerminalPrompter;
    let subscription_id = prompter
        .read_line("Enter PayWhirl Subscription ID")
        .await
        .unwrap_or_default();
    let subscription_id = subscription_id.trim();
    let new_price = if subscription_id.is_empty() {
        String::new()
    } else {
        prompter
            .read_line("Enter new deliveryPrice")
            .await
            .unwrap_or_default()
    };
    let new_price = new_price.trim();

    if subscription_id.is_empty() || new_price.is_empty() {
        ui.print_cancelled();
        return Ok(());
    }
    if !is_valid_price(new_price) {
        bail!("Invalid deliveryPrice '{new_price}': expected a decimal such as 9.99");
    }

    let client = PayWhirlClient::new(&api_config)?;
    let gate = ConfirmationGate::new(cli.yes, Box::new(TerminalPrompter));
    let audit = AuditLogger::new(&config.audit_log);
    let workflow = RecordWorkflow::new(&client, &gate, &audit, ui);

    let outcome = workflow
        .process(&UpdateRequest::new(subscription_id, new_price))
        .await
        .context(AUDIT_ABORT)?;

    ui.print_lines(&RunSummary::new(std::slice::from_ref(&outcome)).lines("Summary"));
    Ok(())
}
