use serde::Serialize;

use crate::domain::AppError;

/// Renders embedded artifact templates.
///
/// Keeps the template engine out of the emitters.
pub trait TemplateRenderer {
    /// Render the named embedded template against a serializable context.
    fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String, AppError>;
}
