//! Access to the text-generation service.
//!
//! The rest of the crate only sees [TextGenerator], so tests can swap the HTTP client for a mock.

use async_trait::async_trait;
use tracing::debug;

mod error;
mod openai;
mod types;

pub use error::LlmError;
pub use openai::OpenAiClient;
pub use types::{ChatMessage, PromptRequest, Role};

use crate::config::LlmConfig;

/// Anything that turns a prompt into free text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: PromptRequest) -> Result<String, LlmError>;
}

/// Create the text generator described by the configuration.
///
/// Fails early when the API key is missing so that no journal content is produced for a run that
/// can't finish.
pub fn create_generator(config: &LlmConfig) -> Result<Box<dyn TextGenerator>, LlmError> {
    debug!(model = %config.model, base_url = %config.base_url, "create_generator: called");
    Ok(Box::new(OpenAiClient::from_config(config)?))
}
