//! Interactive parameter collection.
//!
//! [`Prompter`] is the blocking terminal seam; [`SerialPrompter`] wraps one
//! so async providers can ask questions without overlapping on the terminal.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::PromptError;

/// Blocking question/answer collaborator.
///
/// `ask_select` and `ask_autocomplete` return the index of the chosen item.
pub trait Prompter: Send + Sync + 'static {
    fn ask_text(&self, message: &str) -> Result<String, PromptError>;

    fn ask_confirm(&self, message: &str, default: bool) -> Result<bool, PromptError>;

    fn ask_select(&self, message: &str, items: &[String]) -> Result<usize, PromptError>;

    /// Like `ask_select`, but the list is narrowed as the user types.
    fn ask_autocomplete(&self, message: &str, items: &[String]) -> Result<usize, PromptError>;
}

/// Runs one question at a time on the blocking pool.
///
/// Cheap to clone; all clones share the same queue.
pub struct SerialPrompter<P> {
    inner: Arc<P>,
    queue: Arc<Mutex<()>>,
}

impl<P> Clone for SerialPrompter<P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            queue: self.queue.clone(),
        }
    }
}

impl<P: Prompter> SerialPrompter<P> {
    pub fn new(prompter: P) -> Self {
        Self {
            inner: Arc::new(prompter),
            queue: Arc::new(Mutex::new(())),
        }
    }

    pub async fn text(&self, message: &str) -> Result<String, PromptError> {
        let message = message.to_string();
        self.ask(move |p| p.ask_text(&message)).await
    }

    pub async fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError> {
        let message = message.to_string();
        self.ask(move |p| p.ask_confirm(&message, default)).await
    }

    pub async fn select(&self, message: &str, items: Vec<String>) -> Result<usize, PromptError> {
        let message = message.to_string();
        self.ask(move |p| p.ask_select(&message, &items)).await
    }

    pub async fn autocomplete(
        &self,
        message: &str,
        items: Vec<String>,
    ) -> Result<usize, PromptError> {
        let message = message.to_string();
        self.ask(move |p| p.ask_autocomplete(&message, &items)).await
    }

    async fn ask<T, F>(&self, question: F) -> Result<T, PromptError>
    where
        T: Send + 'static,
        F: FnOnce(&P) -> Result<T, PromptError> + Send + 'static,
    {
        let _turn = self.queue.lock().await;
        let prompter = self.inner.clone();
        tokio::task::spawn_blocking(move || question(&prompter))
            .await
            .map_err(|e| PromptError::Task(e.to_string()))?
    }
}
