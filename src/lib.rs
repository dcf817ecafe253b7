//! deltas-setup: interactive wizard generating deployment artifacts for a Deltas stack.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::AppContext;
pub use app::api::{ServiceSummary, SetupOutcome, SetupSummary, setup, setup_at, setup_with};
pub use domain::AppError;
