use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::client::TestServerApi;
use crate::error::{ClientError, ClientResult};
use crate::models::{ExecutionReport, ExecutionStatus, TestRecipe};

/// In-memory test server for unit testing. Status fetches are served from a
/// per-execution script of reports and injected errors; once the script is
/// exhausted the last known report is repeated.
#[derive(Clone, Default)]
pub struct InMemoryTestServer {
    inner: Arc<Mutex<InMemoryTestServerInner>>,
}

#[derive(Default)]
struct InMemoryTestServerInner {
    next_id: u64,
    submitted: Vec<SubmittedRecipe>,
    initial_reports: VecDeque<ExecutionReport>,
    status_scripts: HashMap<String, VecDeque<StatusFetch>>,
    last_reports: HashMap<String, ExecutionReport>,
    uploads: Vec<FileUpload>,
    fail_next_submission: bool,
}

/// A recipe received by the server, with the submission mode
#[derive(Debug, Clone)]
pub struct SubmittedRecipe {
    pub recipe: TestRecipe,
    pub run_async: bool,
}

/// A file received through the upload endpoint
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub execution_id: String,
    pub file_name: String,
    pub size: usize,
}

enum StatusFetch {
    Report(ExecutionReport),
    Error(String),
}

impl InMemoryTestServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the report returned by the next recipe submission
    pub async fn enqueue_submit_report(&self, report: ExecutionReport) {
        let mut inner = self.inner.lock().await;
        inner.initial_reports.push_back(report);
    }

    /// Script the next status fetch for an execution
    pub async fn push_status_report(&self, execution_id: &str, report: ExecutionReport) {
        let mut inner = self.inner.lock().await;
        inner
            .status_scripts
            .entry(execution_id.to_string())
            .or_default()
            .push_back(StatusFetch::Report(report));
    }

    /// Script a failing status fetch for an execution
    pub async fn push_status_error(&self, execution_id: &str, message: &str) {
        let mut inner = self.inner.lock().await;
        inner
            .status_scripts
            .entry(execution_id.to_string())
            .or_default()
            .push_back(StatusFetch::Error(message.to_string()));
    }

    /// Make the next submission fail with a transport error
    pub async fn fail_next_submission(&self) {
        let mut inner = self.inner.lock().await;
        inner.fail_next_submission = true;
    }

    pub async fn submitted(&self) -> Vec<SubmittedRecipe> {
        let inner = self.inner.lock().await;
        inner.submitted.clone()
    }

    pub async fn uploads(&self) -> Vec<FileUpload> {
        let inner = self.inner.lock().await;
        inner.uploads.clone()
    }
}

#[async_trait]
impl TestServerApi for InMemoryTestServer {
    async fn post_recipe(
        &self,
        recipe: &TestRecipe,
        run_async: bool,
    ) -> ClientResult<ExecutionReport> {
        let mut inner = self.inner.lock().await;

        if inner.fail_next_submission {
            inner.fail_next_submission = false;
            return Err(ClientError::Transport("connection refused".to_string()));
        }

        inner.submitted.push(SubmittedRecipe {
            recipe: recipe.clone(),
            run_async,
        });

        let report = match inner.initial_reports.pop_front() {
            Some(report) => report,
            None => {
                inner.next_id += 1;
                ExecutionReport {
                    execution_id: format!("execution-{}", inner.next_id),
                    status: if run_async {
                        ExecutionStatus::Running
                    } else {
                        ExecutionStatus::Finished
                    },
                    time_taken: 0,
                    test_suite_reports: Vec::new(),
                    unresolved_files: Vec::new(),
                }
            }
        };

        inner
            .last_reports
            .insert(report.execution_id.clone(), report.clone());
        Ok(report)
    }

    async fn get_execution_status(&self, execution_id: &str) -> ClientResult<ExecutionReport> {
        let mut inner = self.inner.lock().await;

        let scripted = inner
            .status_scripts
            .get_mut(execution_id)
            .and_then(VecDeque::pop_front);

        match scripted {
            Some(StatusFetch::Report(report)) => {
                inner
                    .last_reports
                    .insert(execution_id.to_string(), report.clone());
                Ok(report)
            }
            Some(StatusFetch::Error(message)) => Err(ClientError::Transport(message)),
            None => inner
                .last_reports
                .get(execution_id)
                .cloned()
                .ok_or_else(|| ClientError::NotFound(format!("Execution {}", execution_id))),
        }
    }

    async fn cancel_execution(&self, execution_id: &str) -> ClientResult<ExecutionReport> {
        let mut inner = self.inner.lock().await;
        let report = inner
            .last_reports
            .get_mut(execution_id)
            .ok_or_else(|| ClientError::NotFound(format!("Execution {}", execution_id)))?;

        report.status = ExecutionStatus::Canceled;
        Ok(report.clone())
    }

    async fn get_executions(&self) -> ClientResult<Vec<ExecutionReport>> {
        let inner = self.inner.lock().await;
        Ok(inner.last_reports.values().cloned().collect())
    }

    async fn upload_file(
        &self,
        execution_id: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> ClientResult<()> {
        let mut inner = self.inner.lock().await;
        inner.uploads.push(FileUpload {
            execution_id: execution_id.to_string(),
            file_name: file_name.to_string(),
            size: content.len(),
        });
        Ok(())
    }
}
