//! Operator confirmation before a subscription is mutated.

use anyhow::Result;
use async_trait::async_trait;
use console::Term;
use dialoguer::Input;
use std::io::BufRead;
use tracing::warn;

/// Reads one line of operator input.
/// Real implementation: `TerminalPrompter`. Test double: `ScriptedPrompter`.
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn read_line(&self, prompt: &str) -> Result<String>;
}

/// Prompts on the controlling terminal, or reads plain lines from stdin when
/// stdin is piped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn read_line_blocking(prompt: &str) -> Result<String> {
        let term = Term::stderr();
        if term.is_term() && console::user_attended() {
            let answer: String = Input::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text_on(&term)?;
            return Ok(answer);
        }

        eprint!("{prompt}: ");
        let mut line = String::new();
        let read = std::io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            anyhow::bail!("stdin closed before an answer was given");
        }
        Ok(line)
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn read_line(&self, prompt: &str) -> Result<String> {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || Self::read_line_blocking(&prompt)).await?
    }
}

/// Decides per record whether the update may proceed.
///
/// `skip_all` is fixed for the whole invocation (`--yes`).
pub struct ConfirmationGate {
    skip_all: bool,
    prompter: Box<dyn Prompter>,
}

impl ConfirmationGate {
    pub const PROMPT: &'static str = "Confirm update? (y/N)";

    pub fn new(skip_all: bool, prompter: Box<dyn Prompter>) -> Self {
        Self { skip_all, prompter }
    }

    pub fn skips_confirmation(&self) -> bool {
        self.skip_all
    }

    /// `true` to proceed. Only a `y` answer (any case, surrounding whitespace
    /// ignored) approves; anything else, including unreadable input, declines.
    pub async fn confirm(&self) -> bool {
        if self.skip_all {
            return true;
        }
        match self.prompter.read_line(Self::PROMPT).await {
            Ok(answer) => is_affirmative(&answer),
            Err(e) => {
                warn!("could not read confirmation, treating as decline: {e:#}");
                false
            }
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}
