use anyhow::{Context, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
};
use runwatch_core::config::OpenAiConfig;

use crate::generator::SuggestionGenerator;

/// Chat-completion backed generator for OpenAI-compatible servers.
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(config: &OpenAiConfig) -> Self {
        let mut openai = OpenAIConfig::new().with_api_key(config.api_key.clone());
        if let Some(api_base) = &config.api_base {
            openai = openai.with_api_base(api_base.clone());
        }
        Self { client: Client::with_config(openai), model: config.model.clone() }
    }
}

impl SuggestionGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .max_completion_tokens(max_tokens)
            .messages([ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .context("Failed to build chat message")?
                .into()])
            .build()
            .context("Failed to build chat completion request")?;
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .with_context(|| format!("Chat completion with model {} failed", self.model))?;
        tracing::debug!(
            "Chat completion used {} tokens",
            response.usage.as_ref().map_or(0, |usage| usage.total_tokens)
        );
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
