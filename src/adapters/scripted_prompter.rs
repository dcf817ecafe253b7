use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::Prompter;

/// One pre-recorded operator answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Accept whatever default the prompt offers.
    Default,
    Confirm(bool),
    /// Typed text; an empty string behaves like pressing enter.
    Text(String),
    Secret(String),
    Select(usize),
    /// Abort the session at this prompt.
    Cancel,
}

impl Answer {
    pub fn text(value: &str) -> Self {
        Answer::Text(value.to_string())
    }

    pub fn secret(value: &str) -> Self {
        Answer::Secret(value.to_string())
    }
}

/// Prompter replaying a fixed answer script, for tests.
///
/// Once the script is exhausted every prompt takes its default.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
    asked: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
            warnings: Mutex::new(Vec::new()),
        }
    }

    /// Prompter that accepts every default.
    pub fn accepting_defaults() -> Self {
        Self::new([])
    }

    /// Prompts shown so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    pub fn was_asked(&self, fragment: &str) -> bool {
        self.asked.lock().unwrap().iter().any(|prompt| prompt.contains(fragment))
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn next(&self, prompt: &str) -> Answer {
        self.asked.lock().unwrap().push(prompt.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(Answer::Default)
    }
}

fn unexpected(prompt: &str, answer: &Answer) -> AppError {
    AppError::prompt_error(format!("Scripted answer {answer:?} does not fit prompt '{prompt}'"))
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, AppError> {
        match self.next(prompt) {
            Answer::Default => Ok(default),
            Answer::Confirm(value) => Ok(value),
            Answer::Cancel => Err(AppError::Cancelled),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String, AppError> {
        let fallback = default.unwrap_or_default().to_string();
        match self.next(prompt) {
            Answer::Default => Ok(fallback),
            Answer::Text(value) if value.is_empty() => Ok(fallback),
            Answer::Text(value) => Ok(value),
            Answer::Cancel => Err(AppError::Cancelled),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn secret(&self, prompt: &str) -> Result<String, AppError> {
        match self.next(prompt) {
            Answer::Default => Ok(String::new()),
            Answer::Secret(value) | Answer::Text(value) => Ok(value),
            Answer::Cancel => Err(AppError::Cancelled),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize, AppError> {
        match self.next(prompt) {
            Answer::Default => Ok(default),
            Answer::Select(index) if index < items.len() => Ok(index),
            Answer::Cancel => Err(AppError::Cancelled),
            other => Err(unexpected(prompt, &other)),
        }
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}
