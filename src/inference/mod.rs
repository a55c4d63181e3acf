pub mod provider;
pub mod providers;
pub mod types;

pub use provider::{CompletionClient, CompletionError};
pub use providers::{LmStudioProvider, OpenAiProvider};
pub use types::{Choice, Completion, CompletionRequest, Tuning};
