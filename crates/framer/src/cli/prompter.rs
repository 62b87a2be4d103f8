//! Terminal prompter backed by dialoguer.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input, Select};
use framer_core::{PromptError, Prompter};

use super::theme::framer_theme;

/// Asks questions on the controlling terminal.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: framer_theme(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a dialoguer result onto `PromptError`, treating Ctrl+C / terminal
/// disconnect as `Interrupted`.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> Result<T, PromptError> {
    match result {
        Ok(v) => Ok(v),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => {
            Err(PromptError::Interrupted)
        }
        Err(dialoguer::Error::IO(e)) => Err(PromptError::Io(e)),
    }
}

/// `_opt` variants return `None` on Esc / `q`.
fn handle_escape<T>(result: dialoguer::Result<Option<T>>) -> Result<T, PromptError> {
    handle_interrupt(result)?.ok_or(PromptError::Interrupted)
}

impl Prompter for DialoguerPrompter {
    fn ask_text(&self, message: &str) -> Result<String, PromptError> {
        handle_interrupt(
            Input::<String>::with_theme(&self.theme)
                .with_prompt(message)
                .interact_text(),
        )
    }

    fn ask_confirm(&self, message: &str, default: bool) -> Result<bool, PromptError> {
        handle_escape(
            Confirm::with_theme(&self.theme)
                .with_prompt(message)
                .default(default)
                .interact_opt(),
        )
    }

    fn ask_select(&self, message: &str, items: &[String]) -> Result<usize, PromptError> {
        handle_escape(
            Select::with_theme(&self.theme)
                .with_prompt(message)
                .items(items)
                .default(0)
                .interact_opt(),
        )
    }

    fn ask_autocomplete(&self, message: &str, items: &[String]) -> Result<usize, PromptError> {
        handle_escape(
            FuzzySelect::with_theme(&self.theme)
                .with_prompt(message)
                .items(items)
                .default(0)
                .interact_opt(),
        )
    }
}
