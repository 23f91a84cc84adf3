//! Pull command handler.
//!
//! Fetches the baseline prompt from the hub and writes it locally.

use super::print_section_header;
use clap::Args;
use promptsync_core::{config::AppConfig, AppResult, PullSettings};
use promptsync_hub::create_hub;
use std::path::PathBuf;

/// Pull a prompt from the hub into local YAML files
#[derive(Args, Debug)]
pub struct PullCommand {
    /// Remote prompt to pull (`owner/name[:commit]`)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Key the record is stored under in the YAML file
    #[arg(short, long)]
    pub key: Option<String>,

    /// Primary output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Raw snapshot output file
    #[arg(long)]
    pub raw_output: Option<PathBuf>,
}

impl PullCommand {
    /// Execute the pull command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing pull command");
        tracing::debug!("Pull command options: {:?}", self);

        print_section_header("PULL PROMPTS FROM LANGSMITH HUB");

        let hub = create_hub(config)?;
        let settings = self.settings(config);

        println!("   Pulling prompt: {}", settings.source);
        let outcome = promptsync_workflow::pull(hub.as_ref(), &settings, &config.workspace).await?;
        println!("   ✓ Prompt loaded");

        for path in &outcome.written {
            println!("   ✓ Saved to: {}", path.display());
        }

        println!("\n✅ Pull completed!");
        println!("\nNext steps:");
        println!("  1. Review the prompt in {}", settings.output_file.display());
        println!("  2. Write the optimized prompt in {}", config.push.file.display());

        Ok(())
    }

    fn settings(&self, config: &AppConfig) -> PullSettings {
        let mut settings = config.pull.clone();
        if let Some(ref source) = self.source {
            settings.source = source.clone();
        }
        if let Some(ref key) = self.key {
            settings.key = key.clone();
        }
        if let Some(ref output) = self.output {
            settings.output_file = output.clone();
        }
        if let Some(ref raw_output) = self.raw_output {
            settings.raw_output_file = raw_output.clone();
        }
        settings
    }
}
