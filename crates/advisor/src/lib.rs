//! Cause/fix suggestions for CI error lines.
//!
//! Suggestions come from a chain of [`Advise`] stages: canned rules first,
//! then an optional text generator. When every stage declines, the advisor
//! answers with a generic suggestion, so [`FixAdvisor::advise`] never fails.

pub mod generator;
pub mod openai;
pub mod rules;

use std::{future::Future, time::Duration};

pub use generator::{GeneratorStage, SuggestionGenerator};
pub use openai::OpenAiGenerator;
pub use rules::RuleTable;
use runwatch_core::{config::Config, models::Suggestion};

/// One stage of suggestion lookup. `None` passes the error on to the next stage.
pub trait Advise {
    fn advise(&self, error_text: &str) -> impl Future<Output = Option<Suggestion>> + Send;
}

impl<A> Advise for Option<A>
where A: Advise + Sync
{
    async fn advise(&self, error_text: &str) -> Option<Suggestion> {
        match self {
            Some(stage) => stage.advise(error_text).await,
            None => None,
        }
    }
}

impl<A, B> Advise for (A, B)
where
    A: Advise + Sync,
    B: Advise + Sync,
{
    async fn advise(&self, error_text: &str) -> Option<Suggestion> {
        if let Some(suggestion) = self.0.advise(error_text).await {
            return Some(suggestion);
        }
        self.1.advise(error_text).await
    }
}

pub fn generic_suggestion() -> Suggestion {
    Suggestion::new(
        "workflow failed due to a configuration or dependency issue",
        "review the error message and update the workflow or project files accordingly",
    )
}

/// Rules, then a generator if one is configured.
pub type DefaultStages<G> = (RuleTable, Option<GeneratorStage<G>>);

pub struct FixAdvisor<A> {
    stages: A,
}

impl<A> FixAdvisor<A>
where A: Advise
{
    pub fn new(stages: A) -> Self { Self { stages } }

    pub async fn advise(&self, error_text: &str) -> Suggestion {
        match self.stages.advise(error_text).await {
            Some(suggestion) => suggestion,
            None => {
                tracing::debug!("No suggestion found, using generic fallback");
                generic_suggestion()
            }
        }
    }
}

impl<G> FixAdvisor<DefaultStages<G>>
where G: SuggestionGenerator + Sync
{
    pub fn with_generator(rules: RuleTable, generator: Option<GeneratorStage<G>>) -> Self {
        Self::new((rules, generator))
    }
}

impl FixAdvisor<DefaultStages<OpenAiGenerator>> {
    /// Built-in and configured rules, backed by OpenAI when an API key is configured.
    pub fn from_config(config: &Config) -> Self {
        let rules = RuleTable::builtin().with_configured(&config.advisor.rules);
        let generator = config.openai.as_ref().map(|openai| {
            tracing::info!("Using model {} for suggestions", openai.model);
            GeneratorStage::new(
                OpenAiGenerator::new(openai),
                openai.max_tokens,
                Duration::from_secs(openai.timeout_secs),
            )
        });
        if generator.is_none() {
            tracing::info!("No OpenAI configuration, unmatched errors get a generic suggestion");
        }
        Self::with_generator(rules, generator)
    }
}
