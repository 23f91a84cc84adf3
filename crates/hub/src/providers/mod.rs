//! Prompt hub backends.

pub mod langsmith;
pub mod memory;

pub use langsmith::LangSmithClient;
pub use memory::MemoryHub;
