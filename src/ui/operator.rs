use crate::ui::icons::{CHECK, CLIPBOARD, CROSS, PAUSE, RESUME, SKIP};
use console::style;
use std::time::Duration;

/// Operator-facing output for a run.
///
/// Progress and results go to stdout; per-record errors go to stderr. This is
/// independent of the `tracing` log filter.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperatorUI;

impl OperatorUI {
    pub fn new() -> Self {
        Self
    }

    pub fn print_batch_start(&self, count: usize) {
        println!(
            "{}Starting batch process for {} subscriptions...",
            CLIPBOARD,
            style(count).bold()
        );
    }

    pub fn print_record_header(&self, subscription_id: &str) {
        println!();
        println!(
            "{}",
            style(format!("--- Processing Subscription: {subscription_id} ---")).bold()
        );
    }

    pub fn print_prices(&self, old: &str, new: &str) {
        println!("Current deliveryPrice: {}", style(old).yellow());
        println!("New deliveryPrice: {}", style(new).green());
    }

    pub fn print_auto_confirmed(&self) {
        println!("  {} (--yes flag)", style("Auto-confirmed").dim());
    }

    pub fn print_skipped(&self) {
        println!("{}Skipped.", SKIP);
    }

    pub fn print_success(&self) {
        println!("{}Success: deliveryPrice updated.", CHECK);
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{}{} {}", CROSS, style("Error:").red().bold(), message);
    }

    pub fn print_throttle_pause(&self, processed: usize, pause: Duration) {
        println!();
        println!(
            "{}Throttle: pausing for {}s after {} updates…",
            PAUSE,
            pause.as_secs(),
            processed
        );
    }

    pub fn print_resume(&self) {
        println!("{}Resume: Continuing batch processing.", RESUME);
    }

    pub fn print_cancelled(&self) {
        println!("Input cancelled.");
    }

    pub fn print_lines(&self, lines: &[String]) {
        for line in lines {
            println!("{line}");
        }
    }
}
