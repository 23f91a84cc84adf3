//! Command handlers for the promptsync CLI.
//!
//! Each subcommand prints human-readable progress on stdout; diagnostics go
//! through `tracing` on stderr.

pub mod check;
pub mod pull;
pub mod push;

// Re-export command types for convenience
pub use check::CheckCommand;
pub use pull::PullCommand;
pub use push::PushCommand;

const RULE_WIDTH: usize = 50;

/// Print a banner between two horizontal rules.
pub(crate) fn print_section_header(title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("\n{}", rule);
    println!("{}", title);
    println!("{}\n", rule);
}
