use include_dir::{Dir, include_dir};
use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use serde::Serialize;

use crate::domain::AppError;
use crate::domain::artifacts::TemplateRenderer;

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

/// Template renderer using Minijinja over the embedded `assets/templates` directory.
pub struct MinijinjaTemplateRenderer {
    env: Environment<'static>,
}

impl MinijinjaTemplateRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    fn source(template_name: &str) -> Result<&'static str, AppError> {
        let file = TEMPLATES_DIR.get_file(template_name).ok_or_else(|| AppError::Template {
            name: template_name.to_string(),
            reason: "not embedded".to_string(),
        })?;
        file.contents_utf8().ok_or_else(|| AppError::Template {
            name: template_name.to_string(),
            reason: "not UTF-8".to_string(),
        })
    }
}

impl Default for MinijinjaTemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String, AppError> {
        let source = Self::source(template_name)?;
        self.env
            .render_named_str(template_name, source, Value::from_serialize(context))
            .map_err(|err| AppError::Template {
                name: template_name.to_string(),
                reason: err.to_string(),
            })
    }
}
