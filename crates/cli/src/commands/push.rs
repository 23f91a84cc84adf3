//! Push command handler.
//!
//! Validates the optimized prompt and publishes it to the hub.

use super::print_section_header;
use clap::Args;
use promptsync_core::{config::AppConfig, AppError, AppResult, PushSettings};
use promptsync_hub::{create_hub, MemoryHub, PromptHub};
use promptsync_workflow::{execute_push, load_for_push, plan_push};
use std::path::PathBuf;
use std::sync::Arc;

/// Validate a local prompt and push it to the hub
#[derive(Args, Debug)]
pub struct PushCommand {
    /// Prompt file to push
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Key of the record inside the file (also the hub prompt name)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Hub handle to publish under (overrides USERNAME_LANGSMITH_HUB)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Validate and plan the push without contacting the hub
    #[arg(long)]
    pub dry_run: bool,
}

impl PushCommand {
    /// Execute the push command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing push command");
        tracing::debug!("Push command options: {:?}", self);

        print_section_header("PUSH OPTIMIZED PROMPTS TO LANGSMITH HUB");

        let hub: Arc<dyn PromptHub> = if self.dry_run {
            tracing::info!("Dry run: using in-memory hub");
            Arc::new(MemoryHub::new())
        } else {
            create_hub(config)?
        };
        let settings = self.settings(config);
        let username = self.username.as_deref().or(config.username.as_deref());

        println!("Loading prompt from: {}", settings.file.display());
        let record = load_for_push(&settings, &config.workspace)?;

        println!("\nValidating prompt...");
        let request = match plan_push(&record, &settings, username) {
            Ok(request) => request,
            Err(AppError::Validation(errors)) => {
                println!("❌ Prompt has validation errors:");
                for error in &errors {
                    println!("   - {}", error);
                }
                return Err(AppError::Validation(errors));
            }
            Err(e) => return Err(e),
        };
        println!("   ✓ Prompt is valid");

        println!("\nPushing prompt...");
        println!("   Pushing: {}", request.identifier.full_name());
        println!(
            "   Public: {}",
            if request.is_public {
                "yes"
            } else {
                "no (no hub handle configured)"
            }
        );
        println!("   Description: {}", request.description);
        println!("   Tags: {}", request.tags.join(", "));

        let receipt = execute_push(hub.as_ref(), &request).await?;
        println!("   ✓ Push succeeded");
        if let Some(ref hash) = receipt.commit_hash {
            println!("   Commit: {}", hash);
        }
        println!("   🔗 Check it at: {}", receipt.url);

        if self.dry_run {
            println!("\n✅ Dry run completed, nothing was sent to the hub");
        } else {
            println!("\n✅ Push completed!");
            println!("\nNext steps:");
            println!("  1. Review the prompt in the LangSmith dashboard");
            println!("  2. Run the evaluation against the new version");
        }

        Ok(())
    }

    fn settings(&self, config: &AppConfig) -> PushSettings {
        let mut settings = config.push.clone();
        if let Some(ref file) = self.file {
            settings.file = file.clone();
        }
        if let Some(ref key) = self.key {
            settings.key = key.clone();
        }
        settings
    }
}
