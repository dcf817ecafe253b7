pub mod dialoguer_prompter;
pub mod filesystem_store;
pub mod fixed_secret;
pub mod memory_store;
pub mod openssl_secret;
pub mod scripted_prompter;
pub mod template;

pub use dialoguer_prompter::DialoguerPrompter;
pub use filesystem_store::FilesystemArtifactStore;
pub use fixed_secret::FixedSecretSource;
pub use memory_store::MemoryArtifactStore;
pub use openssl_secret::OpensslSecretSource;
pub use scripted_prompter::{Answer, ScriptedPrompter};
pub use template::MinijinjaTemplateRenderer;
