use anyhow::{Context, Result};
use http::StatusCode;
use octocrab::{Octocrab, models::RunId};
use runwatch_core::{
    config::GitHubConfig,
    models::{Conclusion, MonitorTarget, RunRef, WorkflowRef},
    source::WorkflowSource,
};

/// GitHub Actions as a [`WorkflowSource`].
#[derive(Clone)]
pub struct GitHub {
    pub client: Octocrab,
}

impl GitHub {
    pub async fn new(config: &GitHubConfig) -> Result<Self> {
        let token = resolve_token(config.token.as_deref(), std::env::var("GITHUB_TOKEN").ok())
            .context("No GitHub token configured (set github.token or GITHUB_TOKEN)")?;
        let mut builder = Octocrab::builder().personal_token(token);
        if let Some(api_url) = &config.api_url {
            builder = builder
                .base_uri(api_url.as_str())
                .with_context(|| format!("Invalid GitHub API URL {api_url}"))?;
        }
        let client = builder.build().context("Failed to create GitHub client")?;
        // Actions tokens cannot read the user profile.
        match client.current().user().await {
            Ok(profile) => tracing::info!("Logged in as {}", profile.login),
            Err(e) => tracing::debug!("Could not fetch current user: {:?}", e),
        }
        Ok(Self { client })
    }
}

fn resolve_token(configured: Option<&str>, env: Option<String>) -> Option<String> {
    let usable = |token: &str| !token.trim().is_empty();
    configured
        .filter(|token| usable(token))
        .map(str::to_string)
        .or_else(|| env.filter(|token| usable(token)))
}

fn is_missing(err: &octocrab::Error) -> bool {
    match err {
        octocrab::Error::GitHub { source, .. } => is_missing_status(source.status_code),
        _ => false,
    }
}

/// Expired or deleted run logs come back as 404 or 410.
fn is_missing_status(status: StatusCode) -> bool {
    matches!(status, StatusCode::NOT_FOUND | StatusCode::GONE)
}

impl WorkflowSource for GitHub {
    async fn list_workflows(&self, target: &MonitorTarget) -> Result<Vec<WorkflowRef>> {
        let repo = &target.repository;
        let page = self
            .client
            .workflows(&repo.owner, &repo.name)
            .list()
            .per_page(100)
            .send()
            .await
            .with_context(|| format!("Failed to fetch workflows for {repo}"))?;
        let workflows = self
            .client
            .all_pages(page)
            .await
            .with_context(|| format!("Failed to fetch workflow pages for {repo}"))?;
        tracing::debug!("Found {} workflows in {}", workflows.len(), repo);
        Ok(workflows
            .into_iter()
            .map(|workflow| WorkflowRef { id: workflow.id.into_inner(), name: workflow.name })
            .collect())
    }

    async fn latest_run(
        &self,
        target: &MonitorTarget,
        workflow: &WorkflowRef,
    ) -> Result<Option<RunRef>> {
        let repo = &target.repository;
        let result = self
            .client
            .workflows(&repo.owner, &repo.name)
            .list_runs(workflow.id.to_string())
            .branch(target.branch.as_str())
            .per_page(1u8)
            .send()
            .await;
        match result {
            Ok(page) => Ok(page.items.into_iter().next().map(|run| RunRef {
                id: run.id.into_inner(),
                conclusion: Conclusion::from_raw(run.conclusion.as_deref()),
            })),
            Err(e) if is_missing(&e) => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to fetch runs of workflow {}", workflow.name)),
        }
    }

    async fn fetch_log_archive(
        &self,
        target: &MonitorTarget,
        run_id: u64,
    ) -> Result<Option<Vec<u8>>> {
        let repo = &target.repository;
        match self
            .client
            .actions()
            .download_workflow_run_logs(&repo.owner, &repo.name, RunId(run_id))
            .await
        {
            Ok(bytes) => {
                tracing::debug!("Downloaded {} bytes of logs for run {}", bytes.len(), run_id);
                Ok(Some(Vec::from(bytes)))
            }
            Err(e) if is_missing(&e) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to download logs for run {run_id}")),
        }
    }
}
