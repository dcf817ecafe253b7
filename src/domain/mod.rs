pub mod artifacts;
pub mod configuration;
pub mod defaults;
pub mod error;
pub mod service;
pub mod topology;

pub use configuration::{EnvSnapshot, FallbackChain};
pub use error::AppError;
pub use service::{DeploymentMode, ServiceKind, ServiceSelection};
pub use topology::{AdminSettings, CollectedAnswers, SmtpSettings, TopologyModel};
