pub mod env_snapshot;
pub mod fallback;

pub use env_snapshot::EnvSnapshot;
pub use fallback::FallbackChain;
