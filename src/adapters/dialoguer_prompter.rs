use std::io::ErrorKind;

use dialoguer::{Confirm, Error as DialoguerError, Input, Password, Select};

use crate::domain::AppError;
use crate::ports::Prompter;

/// Terminal prompter backed by `dialoguer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn prompt_failure(prompt: &str, err: DialoguerError) -> AppError {
    match err {
        DialoguerError::IO(io) if io.kind() == ErrorKind::Interrupted => AppError::Cancelled,
        other => AppError::prompt_error(format!("Failed to read '{prompt}': {other}")),
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, AppError> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .map_err(|err| prompt_failure(prompt, err))?
            .ok_or(AppError::Cancelled)
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String, AppError> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default.filter(|d| !d.is_empty()) {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(|err| prompt_failure(prompt, err))
    }

    fn secret(&self, prompt: &str) -> Result<String, AppError> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|err| prompt_failure(prompt, err))
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize, AppError> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact_opt()
            .map_err(|err| prompt_failure(prompt, err))?
            .ok_or(AppError::Cancelled)
    }

    fn warn(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }
}
