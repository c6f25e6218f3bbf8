use runwatch_advisor::{Advise, FixAdvisor};
use runwatch_core::{
    models::{
        AnnotatedError, Conclusion, ErrorOccurrence, MissingLogs, MonitorTarget, RunResult,
        WorkflowRef,
    },
    source::WorkflowSource,
};
use runwatch_logs::{extract_errors, read_archive};

/// Where a workflow's latest run ended up after one monitoring pass.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RunOutcome {
    Passed,
    /// Failed, but the log archive was missing or unreadable.
    FailedNoLogs(MissingLogs),
    FailedWithReport(RunResult),
    /// No run, a lookup error, or a conclusion other than success/failure.
    Unavailable,
}

pub struct RunClassifier<'a, S, A> {
    target: &'a MonitorTarget,
    source: &'a S,
    advisor: &'a FixAdvisor<A>,
}

impl<'a, S, A> RunClassifier<'a, S, A>
where
    S: WorkflowSource,
    A: Advise,
{
    pub fn new(target: &'a MonitorTarget, source: &'a S, advisor: &'a FixAdvisor<A>) -> Self {
        Self { target, source, advisor }
    }

    pub async fn classify(&self, workflow: &WorkflowRef) -> RunOutcome {
        let run = match self.source.latest_run(self.target, workflow).await {
            Ok(Some(run)) => run,
            Ok(None) => {
                tracing::info!("{} has no runs on {}", workflow.name, self.target.branch);
                return RunOutcome::Unavailable;
            }
            Err(e) => {
                tracing::warn!("Failed to fetch latest run of {}: {:?}", workflow.name, e);
                return RunOutcome::Unavailable;
            }
        };
        match run.conclusion {
            Conclusion::Success => {
                tracing::info!("{} passed (run {})", workflow.name, run.id);
                RunOutcome::Passed
            }
            Conclusion::Failure => {
                tracing::info!("{} failed (run {})", workflow.name, run.id);
                self.report_failure(workflow, run.id).await
            }
            Conclusion::Other(conclusion) => {
                tracing::info!(
                    "{} concluded {} (run {}), skipping",
                    workflow.name,
                    conclusion,
                    run.id
                );
                RunOutcome::Unavailable
            }
        }
    }

    async fn report_failure(&self, workflow: &WorkflowRef, run_id: u64) -> RunOutcome {
        let missing = || {
            RunOutcome::FailedNoLogs(MissingLogs { workflow_name: workflow.name.clone(), run_id })
        };
        let bytes = match self.source.fetch_log_archive(self.target, run_id).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::warn!("No logs available for run {} of {}", run_id, workflow.name);
                return missing();
            }
            Err(e) => {
                tracing::warn!("Failed to download logs for run {}: {:?}", run_id, e);
                return missing();
            }
        };
        let lines = match read_archive(&bytes) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!("Unusable logs for run {} of {}: {}", run_id, workflow.name, e);
                return missing();
            }
        };
        let errors = annotate_errors(self.advisor, extract_errors(&lines)).await;
        tracing::info!("Found {} errors in run {} of {}", errors.len(), run_id, workflow.name);
        RunOutcome::FailedWithReport(RunResult {
            workflow_name: workflow.name.clone(),
            run_id,
            errors,
        })
    }
}

/// Advises each error in turn, numbering them from 1.
pub async fn annotate_errors<A>(
    advisor: &FixAdvisor<A>,
    occurrences: Vec<ErrorOccurrence>,
) -> Vec<AnnotatedError>
where
    A: Advise,
{
    let mut errors = Vec::with_capacity(occurrences.len());
    for (idx, occurrence) in occurrences.into_iter().enumerate() {
        let suggestion = advisor.advise(&occurrence.text).await;
        errors.push(AnnotatedError { error_number: idx + 1, occurrence, suggestion });
    }
    errors
}
