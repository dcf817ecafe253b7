//! CLI Adapter.

mod setup;

use std::io::Write;

use clap::Parser;
use console::Term;

const CANCELLED_MESSAGE: &str = "Setup cancelled. No files were written.";

#[derive(Parser)]
#[command(name = "deltas-setup")]
#[command(version)]
#[command(
    about = "Interactive wizard generating docker-compose.yaml, nginx.conf and .env files for Deltas",
    long_about = None
)]
struct Cli {}

pub fn run() {
    let _cli = Cli::parse();

    if let Err(e) = ctrlc::set_handler(|| {
        std::process::exit(report_interrupt(&Term::stderr(), &mut std::io::stdout()))
    }) {
        eprintln!("⚠️  Could not install Ctrl-C handler: {}", e);
    }

    match setup::run_setup() {
        Ok(()) => {}
        Err(e) if e.is_cancellation() => println!("{CANCELLED_MESSAGE}"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Restore the cursor a prompt may have hidden and print the cancellation notice.
fn report_interrupt(term: &Term, out: &mut impl Write) -> i32 {
    let _ = term.show_cursor();
    let _ = writeln!(out, "\n{CANCELLED_MESSAGE}");
    let _ = out.flush();
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_reports_cancellation_and_exits_cleanly() {
        let mut out = Vec::new();
        let code = report_interrupt(&Term::stderr(), &mut out);

        assert_eq!(code, 0);
        assert_eq!(String::from_utf8(out).unwrap(), format!("\n{CANCELLED_MESSAGE}\n"));
    }
}
