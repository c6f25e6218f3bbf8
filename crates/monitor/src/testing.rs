use std::{
    collections::HashMap,
    io::{Cursor, Write},
};

use anyhow::{Result, anyhow, bail};
use runwatch_core::{
    models::{Conclusion, MonitorTarget, Repository, RunRef, WorkflowRef},
    source::WorkflowSource,
};
use zip::{ZipWriter, write::SimpleFileOptions};

pub(crate) fn target() -> MonitorTarget {
    MonitorTarget {
        repository: Repository { owner: "octo".to_string(), name: "widgets".to_string() },
        branch: "main".to_string(),
    }
}

pub(crate) fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for &(name, data) in entries {
        writer.start_file(name, SimpleFileOptions::default()).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// In-memory workflow host. Workflow `n` (1-based) has its latest run at id `n * 100`.
#[derive(Default)]
pub(crate) struct FakeSource {
    workflows: Vec<WorkflowRef>,
    runs: HashMap<u64, Result<RunRef, String>>,
    archives: HashMap<u64, Vec<u8>>,
    listing_fails: bool,
}

impl FakeSource {
    fn push_workflow(&mut self, name: &str) -> u64 {
        let id = self.workflows.len() as u64 + 1;
        self.workflows.push(WorkflowRef { id, name: name.to_string() });
        id
    }

    pub(crate) fn with_run(
        mut self,
        name: &str,
        conclusion: Conclusion,
        logs: Option<Vec<u8>>,
    ) -> Self {
        let id = self.push_workflow(name);
        let run_id = id * 100;
        self.runs.insert(id, Ok(RunRef { id: run_id, conclusion }));
        if let Some(logs) = logs {
            self.archives.insert(run_id, logs);
        }
        self
    }

    pub(crate) fn with_no_runs(mut self, name: &str) -> Self {
        self.push_workflow(name);
        self
    }

    pub(crate) fn with_lookup_error(mut self, name: &str) -> Self {
        let id = self.push_workflow(name);
        self.runs.insert(id, Err("502 Bad Gateway".to_string()));
        self
    }

    pub(crate) fn failing_listing(mut self) -> Self {
        self.listing_fails = true;
        self
    }

    pub(crate) fn workflows(&self) -> Vec<WorkflowRef> { self.workflows.clone() }
}

impl WorkflowSource for FakeSource {
    async fn list_workflows(&self, _target: &MonitorTarget) -> Result<Vec<WorkflowRef>> {
        if self.listing_fails {
            bail!("connection refused");
        }
        Ok(self.workflows.clone())
    }

    async fn latest_run(
        &self,
        _target: &MonitorTarget,
        workflow: &WorkflowRef,
    ) -> Result<Option<RunRef>> {
        match self.runs.get(&workflow.id) {
            Some(Ok(run)) => Ok(Some(run.clone())),
            Some(Err(e)) => Err(anyhow!(e.clone())),
            None => Ok(None),
        }
    }

    async fn fetch_log_archive(
        &self,
        _target: &MonitorTarget,
        run_id: u64,
    ) -> Result<Option<Vec<u8>>> {
        Ok(self.archives.get(&run_id).cloned())
    }
}
