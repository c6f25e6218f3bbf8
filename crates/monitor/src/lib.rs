pub mod classify;
pub mod report;
#[cfg(test)]
mod testing;

use runwatch_advisor::{Advise, FixAdvisor};
use runwatch_core::{
    models::{MonitorSummary, MonitorTarget},
    source::WorkflowSource,
};

pub use crate::classify::{RunClassifier, RunOutcome, annotate_errors};

/// Checks the latest run of every workflow in one repository.
pub struct Monitor<S, A> {
    target: MonitorTarget,
    source: S,
    advisor: FixAdvisor<A>,
}

impl<S, A> Monitor<S, A>
where
    S: WorkflowSource,
    A: Advise,
{
    pub fn new(target: MonitorTarget, source: S, advisor: FixAdvisor<A>) -> Self {
        Self { target, source, advisor }
    }

    /// Classifies every workflow, one at a time, in the order the source lists them.
    pub async fn run_pass(&self) -> MonitorSummary {
        let workflows = match self.source.list_workflows(&self.target).await {
            Ok(workflows) => workflows,
            Err(e) => {
                tracing::error!("Failed to list workflows for {}: {:?}", self.target.repository, e);
                Vec::new()
            }
        };
        tracing::info!(
            "Checking {} workflows in {} ({})",
            workflows.len(),
            self.target.repository,
            self.target.branch
        );

        let classifier = RunClassifier::new(&self.target, &self.source, &self.advisor);
        let mut summary = MonitorSummary { total_workflows: workflows.len(), ..Default::default() };
        for workflow in &workflows {
            match classifier.classify(workflow).await {
                RunOutcome::Passed => summary.passed_count += 1,
                RunOutcome::FailedNoLogs(missing) => {
                    summary.failed_count += 1;
                    summary.missing_logs.push(missing);
                }
                RunOutcome::FailedWithReport(result) => {
                    summary.failed_count += 1;
                    summary.results.push(result);
                }
                RunOutcome::Unavailable => summary.unavailable_count += 1,
            }
        }
        tracing::info!(
            "Pass complete: {} passed, {} failed, {} skipped",
            summary.passed_count,
            summary.failed_count,
            summary.unavailable_count
        );
        summary
    }
}
