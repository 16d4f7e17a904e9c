//! `audit` command: show what earlier runs changed.

use anyhow::Result;
use delivery_price::audit::AuditLogger;

use super::super::Cli;
use super::load_config;

pub fn cmd_audit(cli: &Cli, last: usize) -> Result<()> {
    let config = load_config(cli)?;
    let audit = AuditLogger::new(&config.audit_log);
    let entries = audit.tail(last)?;

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    println!();
    println!("Audit log: {}", audit.path().display());
    println!();
    println!(
        "{:<29} {:<20} {:<10} {:<10} {:<8} Error",
        "Timestamp", "Subscription", "Old", "New", "Status"
    );
    println!(
        "{:<29} {:<20} {:<10} {:<10} {:<8} -----",
        "-----------------------------", "--------------------", "---", "---", "------"
    );
    for entry in &entries {
        let error = if entry.error.is_empty() {
            "-"
        } else {
            entry.error.as_str()
        };
        println!(
            "{:<29} {:<20} {:<10} {:<10} {:<8} {}",
            entry.timestamp,
            entry.subscription_id,
            entry.old_delivery_price,
            entry.new_delivery_price,
            entry.status.as_str(),
            error
        );
    }
    println!();
    Ok(())
}
