//! Local prompt records for promptsync.
//!
//! This crate provides:
//! - YAML prompt files (`PromptFile`, `PromptRecord`) and their loader
//! - Conversion between hub prompts and local records
//! - The structural and content rubrics

pub mod builder;
pub mod loader;
pub mod types;
pub mod validation;

// Re-export main types
pub use builder::{chat_template, pull_file, record_from_remote};
pub use loader::{list_prompt_files, load_prompt_file, load_record, save_prompt_file};
pub use types::{PromptFile, PromptRecord};
pub use validation::{
    validate_content, validate_structure, CheckOutcome, ContentCheck, ContentReport,
    ValidationReport,
};
