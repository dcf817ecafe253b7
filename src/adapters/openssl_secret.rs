use std::process::Command;

use crate::domain::AppError;
use crate::ports::SecretSource;

const RANDOM_ARGS: [&str; 3] = ["rand", "-base64", "32"];

/// Generates secrets by shelling out to `openssl rand`.
#[derive(Debug, Clone)]
pub struct OpensslSecretSource {
    program: String,
}

impl OpensslSecretSource {
    pub fn new() -> Self {
        Self::with_program("openssl")
    }

    /// Use a different executable in place of `openssl`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    fn command_line(&self) -> String {
        format!("{} {}", self.program, RANDOM_ARGS.join(" "))
    }
}

impl Default for OpensslSecretSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretSource for OpensslSecretSource {
    fn generate(&self) -> Result<String, AppError> {
        let output = Command::new(&self.program).args(RANDOM_ARGS).output().map_err(|e| {
            AppError::CommandFailed { command: self.command_line(), details: e.to_string() }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::CommandFailed {
                command: self.command_line(),
                details: if stderr.is_empty() { "Unknown error".to_string() } else { stderr },
            });
        }

        let secret = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if secret.is_empty() {
            return Err(AppError::CommandFailed {
                command: self.command_line(),
                details: "produced no output".to_string(),
            });
        }
        Ok(secret)
    }
}
