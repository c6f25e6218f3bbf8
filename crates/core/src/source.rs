use std::future::Future;

use anyhow::Result;

use crate::models::{MonitorTarget, RunRef, WorkflowRef};

/// Read access to a CI host's workflows, runs and run logs.
pub trait WorkflowSource {
    fn list_workflows(
        &self,
        target: &MonitorTarget,
    ) -> impl Future<Output = Result<Vec<WorkflowRef>>> + Send;

    /// The most recent run of `workflow` on the target branch, if any.
    fn latest_run(
        &self,
        target: &MonitorTarget,
        workflow: &WorkflowRef,
    ) -> impl Future<Output = Result<Option<RunRef>>> + Send;

    /// The zipped log bundle of a run, or `None` when the host has no logs for it.
    fn fetch_log_archive(
        &self,
        target: &MonitorTarget,
        run_id: u64,
    ) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;
}
