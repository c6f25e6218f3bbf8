use runwatch_core::{config::RuleConfig, models::Suggestion};

use crate::Advise;

#[derive(Debug, Clone)]
pub struct Rule {
    /// Lowercase substring that selects this rule.
    trigger: String,
    suggestion: Suggestion,
}

/// Canned suggestions keyed by substring, checked in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn builtin() -> Self {
        Self::default().with_rule(
            "ModuleNotFoundError",
            Suggestion::new(
                "a required dependency is missing",
                "add the missing package to the dependency manifest and ensure install step runs \
                 before the failing step",
            ),
        )
    }

    pub fn with_rule(mut self, trigger: &str, suggestion: Suggestion) -> Self {
        self.rules.push(Rule { trigger: trigger.to_lowercase(), suggestion });
        self
    }

    /// Appends rules from the config file. Rules with a blank trigger, cause or fix are skipped.
    pub fn with_configured(self, rules: &[RuleConfig]) -> Self {
        rules.iter().fold(self, |table, rule| {
            let (trigger, cause, fix) = (rule.trigger.trim(), rule.cause.trim(), rule.fix.trim());
            if trigger.is_empty() || cause.is_empty() || fix.is_empty() {
                tracing::warn!("Ignoring incomplete advisor rule {:?}", rule);
                return table;
            }
            table.with_rule(trigger, Suggestion::new(cause, fix))
        })
    }

    pub fn lookup(&self, error_text: &str) -> Option<&Suggestion> {
        let lower = error_text.to_lowercase();
        self.rules.iter().find(|rule| lower.contains(&rule.trigger)).map(|rule| &rule.suggestion)
    }
}

impl Advise for RuleTable {
    async fn advise(&self, error_text: &str) -> Option<Suggestion> {
        self.lookup(error_text).cloned()
    }
}
