use crate::domain::AppError;

/// Port for producing fresh auth secrets.
pub trait SecretSource {
    fn generate(&self) -> Result<String, AppError>;
}
