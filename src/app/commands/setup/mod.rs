//! The setup wizard: collect answers, build the topology, emit and write artifacts.

pub mod collector;
pub mod summary;
pub mod writer;

use crate::app::AppContext;
use crate::domain::artifacts::{TemplateRenderer, emit_all};
use crate::domain::topology::TopologyModel;
use crate::domain::AppError;
use crate::ports::{ArtifactStore, Prompter, SecretSource};

pub use collector::{Collector, load_saved_configuration};
pub use summary::{ServiceSummary, SetupSummary, summarize};
pub use writer::write_artifacts;

/// Result of a completed wizard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOutcome {
    /// Relative paths in the order they were written.
    pub written: Vec<String>,
    pub summary: SetupSummary,
}

/// Execute the wizard against the context's ports.
///
/// Nothing is written until every question has been answered, so a cancelled
/// session leaves the output directory untouched.
pub fn execute<P, S, G, R, F>(
    ctx: &AppContext<P, S, G, R>,
    on_written: F,
) -> Result<SetupOutcome, AppError>
where
    P: Prompter,
    S: ArtifactStore,
    G: SecretSource,
    R: TemplateRenderer,
    F: FnMut(&str),
{
    let saved = load_saved_configuration(ctx.store(), ctx.prompter())?;
    let answers = Collector::new(ctx.prompter(), &saved).collect(ctx.secrets())?;
    let model = TopologyModel::build(answers);

    let artifacts = emit_all(&model, ctx.renderer())?;
    let written = write_artifacts(ctx.store(), &artifacts, on_written)?;

    Ok(SetupOutcome { written, summary: summarize(&model) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixed_secret::FixedSecretSource;
    use crate::adapters::memory_store::MemoryArtifactStore;
    use crate::adapters::scripted_prompter::{Answer, ScriptedPrompter};
    use crate::adapters::template::MinijinjaTemplateRenderer;

    fn context(
        prompter: ScriptedPrompter,
        store: MemoryArtifactStore,
    ) -> AppContext<ScriptedPrompter, MemoryArtifactStore, FixedSecretSource, MinijinjaTemplateRenderer>
    {
        AppContext::new(
            prompter,
            store,
            FixedSecretSource::new("fixed-secret"),
            MinijinjaTemplateRenderer::new(),
        )
    }

    #[test]
    fn defaults_produce_full_stack() {
        let store = MemoryArtifactStore::new();
        let ctx = context(ScriptedPrompter::accepting_defaults(), store.clone());

        let outcome = execute(&ctx, |_| {}).unwrap();

        assert_eq!(
            outcome.written,
            vec!["docker-compose.yaml", "nginx.conf", "app/.env", "deltas/.env"]
        );
        assert_eq!(outcome.summary.services.len(), 7);
        let env = store.file("app/.env").unwrap();
        assert!(env.contains("BETTER_AUTH_SECRET=fixed-secret"));
        assert!(env.contains("DATABASE_URL=postgres://root:mysecretpassword@db:5432/deltas"));
    }

    #[test]
    fn cancellation_writes_nothing() {
        let store = MemoryArtifactStore::new();
        let ctx = context(ScriptedPrompter::new([Answer::Default, Answer::Cancel]), store.clone());

        let result = execute(&ctx, |_| {});

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert!(store.paths().is_empty());
    }

    #[test]
    fn second_run_keeps_saved_secret() {
        let store = MemoryArtifactStore::new();
        execute(&context(ScriptedPrompter::accepting_defaults(), store.clone()), |_| {}).unwrap();

        let rerun = AppContext::new(
            ScriptedPrompter::accepting_defaults(),
            store.clone(),
            FixedSecretSource::new("other-secret"),
            MinijinjaTemplateRenderer::new(),
        );
        execute(&rerun, |_| {}).unwrap();

        assert!(rerun.prompter().was_asked("Existing configuration found"));
        let env = store.file("deltas/.env").unwrap();
        assert!(env.contains("BETTER_AUTH_SECRET=fixed-secret"));
    }
}
