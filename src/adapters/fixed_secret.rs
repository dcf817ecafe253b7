use crate::domain::AppError;
use crate::ports::SecretSource;

/// Secret source returning a preset value, for tests and reproducible runs.
#[derive(Debug, Clone)]
pub struct FixedSecretSource {
    secret: String,
}

impl FixedSecretSource {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }
}

impl SecretSource for FixedSecretSource {
    fn generate(&self) -> Result<String, AppError> {
        Ok(self.secret.clone())
    }
}
