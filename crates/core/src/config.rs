use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::{MonitorTarget, Repository};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    pub openai: Option<OpenAiConfig>,
    #[serde(default)]
    pub advisor: AdvisorConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GitHubConfig {
    /// Personal access token. Falls back to `GITHUB_TOKEN` when unset.
    pub token: Option<String>,
    /// API root for GitHub Enterprise installations.
    pub api_url: Option<Url>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { owner: String::new(), repo: String::new(), branch: default_branch() }
    }
}

impl MonitorConfig {
    pub fn target(&self) -> Result<MonitorTarget> {
        if self.owner.is_empty() || self.repo.is_empty() {
            bail!("No repository configured (set monitor.owner and monitor.repo)");
        }
        Ok(MonitorTarget {
            repository: Repository { owner: self.owner.clone(), name: self.repo.clone() },
            branch: self.branch.clone(),
        })
    }
}

fn default_branch() -> String { "main".to_string() }

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// Base URL of an OpenAI-compatible server.
    pub api_base: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String { "gpt-4o-mini".to_string() }

fn default_max_tokens() -> u32 { 80 }

fn default_timeout_secs() -> u64 { 60 }

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdvisorConfig {
    /// Extra rules, checked after the built-in ones.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RuleConfig {
    pub trigger: String,
    pub cause: String,
    pub fix: String,
}
