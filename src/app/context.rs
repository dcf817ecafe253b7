use crate::domain::artifacts::TemplateRenderer;
use crate::ports::{ArtifactStore, Prompter, SecretSource};

/// Application context holding the ports a wizard run needs.
pub struct AppContext<P, S, G, R>
where
    P: Prompter,
    S: ArtifactStore,
    G: SecretSource,
    R: TemplateRenderer,
{
    prompter: P,
    store: S,
    secrets: G,
    renderer: R,
}

impl<P, S, G, R> AppContext<P, S, G, R>
where
    P: Prompter,
    S: ArtifactStore,
    G: SecretSource,
    R: TemplateRenderer,
{
    pub fn new(prompter: P, store: S, secrets: G, renderer: R) -> Self {
        Self { prompter, store, secrets, renderer }
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Store rooted at the output directory.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn secrets(&self) -> &G {
        &self.secrets
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
