//! Interactive operator prompts.

use crate::domain::AppError;

/// Port for asking the operator questions.
///
/// Every method returns [`AppError::Cancelled`] when the operator aborts.
pub trait Prompter {
    /// Yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, AppError>;

    /// Free-text question. An empty answer yields `default` when one is given.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String, AppError>;

    /// Hidden input; may return an empty string.
    fn secret(&self, prompt: &str) -> Result<String, AppError>;

    /// Pick one of `items`; returns its index.
    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize, AppError>;

    /// Report a rejected answer before re-prompting.
    fn warn(&self, message: &str);
}
