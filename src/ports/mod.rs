mod artifact_store;
mod prompter;
mod secret_source;

pub use artifact_store::ArtifactStore;
pub use prompter::Prompter;
pub use secret_source::SecretSource;
