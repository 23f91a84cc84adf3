//! Check command handler.

use clap::Args;
use promptsync_core::{config::AppConfig, AppError, AppResult};
use promptsync_workflow::{check_all, check_record, CheckResult};
use std::path::PathBuf;

const DEFAULT_PROMPTS_DIR: &str = "prompts";

/// Run the content rubric on local prompt files
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Prompt file or directory (default: the prompts directory)
    pub path: Option<PathBuf>,

    /// Check only this record; defaults the path to the push file
    #[arg(short, long)]
    pub key: Option<String>,
}

impl CheckCommand {
    /// Execute the check command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing check command");
        tracing::debug!("Check command options: {:?}", self);

        let results = match self.key {
            Some(ref key) => {
                let path = self.path.as_ref().unwrap_or(&config.push.file);
                vec![check_record(&config.resolve(path), key)?]
            }
            None => {
                let target = self
                    .path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_PROMPTS_DIR));
                check_all(&config.resolve(&target))?
            }
        };

        if results.is_empty() {
            println!("No prompt records found");
            return Ok(());
        }

        for result in &results {
            print_result(result);
        }

        let failed: Vec<String> = results
            .iter()
            .filter(|r| !r.is_valid())
            .map(|r| r.key.clone())
            .collect();

        println!(
            "\n{}/{} record(s) passed",
            results.len() - failed.len(),
            results.len()
        );

        if failed.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(
                failed
                    .into_iter()
                    .map(|key| format!("'{}' failed the content checks", key))
                    .collect(),
            ))
        }
    }
}

fn print_result(result: &CheckResult) {
    println!("\n{} [{}]", result.path.display(), result.key);
    for outcome in &result.report.outcomes {
        match outcome.message {
            Some(ref message) if !outcome.passed => {
                println!("   ✗ {}: {}", outcome.check, message)
            }
            _ => println!("   ✓ {}", outcome.check),
        }
    }
}
