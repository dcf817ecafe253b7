//! Deployment artifact emitters.
//!
//! Each emitter is a pure function of the [`TopologyModel`]: it first builds a
//! structured model of its artifact, then renders that model to text.

pub mod compose;
pub mod env_file;
pub mod proxy;
mod template;

pub use compose::{ComposeFile, ComposeService, build_compose, emit_compose, port_mapping};
pub use env_file::{EnvDocument, EnvSection, build_env_document, emit_env_file};
pub use proxy::{LocationKind, ProxyConfig, build_proxy_config, emit_proxy_config};
pub use template::TemplateRenderer;

use crate::domain::AppError;
use crate::domain::topology::TopologyModel;

/// Rendered text of every artifact produced by one wizard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub compose: String,
    /// Present only when the reverse proxy is deployed.
    pub nginx_conf: Option<String>,
    pub env: String,
}

/// Run all three emitters against the same model.
pub fn emit_all<R: TemplateRenderer>(
    model: &TopologyModel,
    renderer: &R,
) -> Result<ArtifactSet, AppError> {
    Ok(ArtifactSet {
        compose: emit_compose(model)?,
        nginx_conf: emit_proxy_config(model, renderer)?,
        env: emit_env_file(model, renderer)?,
    })
}
