use std::{future::Future, time::Duration};

use anyhow::Result;
use runwatch_core::models::Suggestion;

use crate::Advise;

const CAUSE_LABEL: &str = "Cause:";
const FIX_LABEL: &str = "Fix:";

/// Free-form text generation, e.g. a language model.
pub trait SuggestionGenerator {
    /// Completes `prompt`, producing at most roughly `max_tokens` tokens.
    fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> impl Future<Output = Result<String>> + Send;
}

pub fn build_prompt(error_text: &str) -> String {
    format!(
        "You are a senior DevOps engineer.\n\
         Explain the root cause and fix for this CI failure.\n\n\
         {error_text}\n\n\
         Respond exactly in this format:\n\
         {CAUSE_LABEL} <one sentence>\n\
         {FIX_LABEL} <one sentence>"
    )
}

/// Picks the `Cause:` and `Fix:` sentences out of generated text.
pub fn parse_suggestion(text: &str) -> Option<Suggestion> {
    let cause_at = text.find(CAUSE_LABEL)?;
    let fix_at = text.find(FIX_LABEL)?;
    let cause_start = cause_at + CAUSE_LABEL.len();
    let fix_start = fix_at + FIX_LABEL.len();
    let (cause, fix) = if cause_at < fix_at {
        (&text[cause_start..fix_at], &text[fix_start..])
    } else {
        (&text[cause_start..], &text[fix_start..cause_at])
    };
    let cause = first_line(cause);
    let fix = first_line(fix);
    (!cause.is_empty() && !fix.is_empty()).then(|| Suggestion::new(cause, fix))
}

fn first_line(text: &str) -> &str { text.trim().lines().next().unwrap_or_default().trim() }

/// Asks a generator for a suggestion, giving up on errors, timeouts and
/// unlabeled output.
pub struct GeneratorStage<G> {
    generator: G,
    max_tokens: u32,
    timeout: Duration,
}

impl<G> GeneratorStage<G> {
    pub fn new(generator: G, max_tokens: u32, timeout: Duration) -> Self {
        Self { generator, max_tokens, timeout }
    }

    pub fn generator(&self) -> &G { &self.generator }
}

impl<G> Advise for GeneratorStage<G>
where G: SuggestionGenerator + Sync
{
    async fn advise(&self, error_text: &str) -> Option<Suggestion> {
        let prompt = build_prompt(error_text);
        let generated =
            tokio::time::timeout(self.timeout, self.generator.generate(&prompt, self.max_tokens))
                .await;
        let text = match generated {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::warn!("Suggestion generation failed: {:?}", e);
                return None;
            }
            Err(_) => {
                tracing::warn!("Suggestion generation timed out after {:?}", self.timeout);
                return None;
            }
        };
        let suggestion = parse_suggestion(&text);
        if suggestion.is_none() {
            tracing::warn!("Generated suggestion is missing labels: {:?}", text.trim());
        }
        suggestion
    }
}
