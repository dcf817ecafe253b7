//! API Facade for the application.
//!
//! Glues context creation to command execution for library callers.

use std::path::PathBuf;

use crate::adapters::{
    DialoguerPrompter, FilesystemArtifactStore, MinijinjaTemplateRenderer, OpensslSecretSource,
};
use crate::app::{AppContext, commands::setup};
use crate::domain::artifacts::TemplateRenderer;
use crate::ports::{ArtifactStore, Prompter, SecretSource};

pub use crate::app::commands::setup::{ServiceSummary, SetupOutcome, SetupSummary};
pub use crate::domain::AppError;

type TerminalContext = AppContext<
    DialoguerPrompter,
    FilesystemArtifactStore,
    OpensslSecretSource,
    MinijinjaTemplateRenderer,
>;

fn create_context(path: PathBuf) -> TerminalContext {
    AppContext::new(
        DialoguerPrompter::new(),
        FilesystemArtifactStore::new(path),
        OpensslSecretSource::new(),
        MinijinjaTemplateRenderer::new(),
    )
}

/// Run the interactive wizard in the current directory.
pub fn setup(on_written: impl FnMut(&str)) -> Result<SetupOutcome, AppError> {
    setup_at(std::env::current_dir()?, on_written)
}

/// Run the interactive wizard, writing artifacts under `path`.
pub fn setup_at(
    path: impl Into<PathBuf>,
    on_written: impl FnMut(&str),
) -> Result<SetupOutcome, AppError> {
    setup::execute(&create_context(path.into()), on_written)
}

/// Run the wizard against caller-supplied ports.
pub fn setup_with<P, S, G, R>(
    ctx: &AppContext<P, S, G, R>,
    on_written: impl FnMut(&str),
) -> Result<SetupOutcome, AppError>
where
    P: Prompter,
    S: ArtifactStore,
    G: SecretSource,
    R: TemplateRenderer,
{
    setup::execute(ctx, on_written)
}
