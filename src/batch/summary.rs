//! End-of-run report.

use super::{Outcome, RecordStatus};

const PLACEHOLDER: &str = "-";

/// Counts and table rows for a finished run, in processing order.
pub struct RunSummary<'a> {
    outcomes: &'a [Outcome],
}

impl<'a> RunSummary<'a> {
    pub fn new(outcomes: &'a [Outcome]) -> Self {
        Self { outcomes }
    }

    pub fn count(&self, status: RecordStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Pre-formatted lines: title, table header, one row per outcome, totals.
    pub fn lines(&self, title: &str) -> Vec<String> {
        let id_width = self
            .outcomes
            .iter()
            .map(|o| o.subscription_id.len())
            .max()
            .unwrap_or(0)
            .max("ID".len());

        let mut lines = vec![
            String::new(),
            format!("--- {title} ---"),
            format!("{:<id_width$}  {:<8}  Error", "ID", "Status"),
            format!("{:-<id_width$}  {:-<8}  -----", "", ""),
        ];

        for outcome in self.outcomes {
            let error = outcome
                .error
                .as_deref()
                .filter(|e| !e.is_empty())
                .unwrap_or(PLACEHOLDER);
            lines.push(format!(
                "{:<id_width$}  {:<8}  {}",
                outcome.subscription_id,
                outcome.status.as_str(),
                error
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "Total: {} (success {}, skipped {}, error {})",
            self.outcomes.len(),
            self.count(RecordStatus::Success),
            self.count(RecordStatus::Skipped),
            self.count(RecordStatus::Error)
        ));
        lines
    }
}
