//! Setup command implementation.

use crate::app::api::{self, SetupSummary};
use crate::domain::AppError;

pub fn run_setup() -> Result<(), AppError> {
    println!("🚀 Deltas deployment setup");
    let outcome = api::setup(|path| println!("✅ Wrote {path}"))?;
    print_summary(&outcome.summary);
    Ok(())
}

fn print_summary(summary: &SetupSummary) {
    println!();
    println!("📦 Services:");
    for service in &summary.services {
        println!(
            "  • {} ({}) {}",
            service.name(),
            service.exposure_label(),
            service.ports.join(", ")
        );
    }
    if !summary.external.is_empty() {
        println!("🌐 External:");
        for kind in &summary.external {
            println!("  • {}", kind.display_name());
        }
    }
    println!();
    println!("Next steps:");
    println!("  docker compose up -d");
    println!("  open {}", summary.origin);
}
