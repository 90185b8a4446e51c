use std::ffi::OsStr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::try_join_all;

use crate::client::{HttpTestServerApi, TestServerApi};
use crate::config::TestServerConfig;
use crate::error::{ClientError, ClientResult};
use crate::execution::handle::Execution;
use crate::execution::listener::{ExecutionListener, ListenerSet};
use crate::execution::poller::StatusPoller;
use crate::extractor::{run_extractors, ExtractorData};
use crate::models::{ExecutionReport, ExecutionStatus, TestRecipe};

/// Submits test recipes to the server and tracks their executions.
///
/// Cheap to clone; clones share the listener registry and extractor data.
#[derive(Clone)]
pub struct RecipeExecutor {
    inner: Arc<ExecutorInner>,
}

struct ExecutorInner {
    api: Arc<dyn TestServerApi>,
    listeners: ListenerSet,
    extractors: Arc<Mutex<Vec<ExtractorData>>>,
    poll_interval: Duration,
}

impl RecipeExecutor {
    /// Create an executor talking HTTP to the configured server
    pub fn new(config: &TestServerConfig) -> ClientResult<Self> {
        let api = Arc::new(HttpTestServerApi::new(config)?);
        Ok(Self::with_api(api, config.poll_interval))
    }

    /// Create an executor over a custom server API (for testing)
    pub fn with_api(api: Arc<dyn TestServerApi>, poll_interval: Duration) -> Self {
        Self {
            inner: Arc::new(ExecutorInner {
                api,
                listeners: ListenerSet::default(),
                extractors: Arc::new(Mutex::new(Vec::new())),
                poll_interval,
            }),
        }
    }

    pub fn add_execution_listener(&self, listener: Arc<dyn ExecutionListener>) {
        self.inner.listeners.add(listener);
    }

    pub fn remove_execution_listener(&self, listener: &Arc<dyn ExecutionListener>) {
        self.inner.listeners.remove(listener);
    }

    /// Register extractor data for the next submissions; operators run when a
    /// matching execution finishes
    pub fn add_extractor_data(&self, data: ExtractorData) {
        self.inner
            .extractors
            .lock()
            .expect("extractor lock poisoned")
            .push(data);
    }

    /// Submit a recipe asynchronously and start polling its status.
    ///
    /// Validation failures (missing data source files, unresolved client
    /// certificates) are returned as errors. Transport failures are reported
    /// through the error-listener channel only and yield `Ok(None)`.
    pub async fn submit_recipe(&self, recipe: &TestRecipe) -> ClientResult<Option<Execution>> {
        validate_data_source_files(recipe)?;

        let Some(report) = self.post_recipe(recipe, true).await else {
            return Ok(None);
        };

        if let Err(error) = self
            .upload_data_source_files(&report.execution_id, recipe)
            .await
        {
            tracing::error!(
                execution_id = %report.execution_id,
                error = %error,
                "Error uploading data source files"
            );
            self.inner.listeners.notify_error(&error);
            return Ok(None);
        }

        self.fail_fast_on_unresolved_files(&report, recipe).await?;

        let execution = Execution::new(report);
        self.inner
            .listeners
            .notify_request_sent(&execution.current_report());

        StatusPoller {
            api: self.inner.api.clone(),
            execution: execution.clone(),
            listeners: self.inner.listeners.clone(),
            extractors: self.inner.extractors.clone(),
            poll_interval: self.inner.poll_interval,
        }
        .spawn();

        Ok(Some(execution))
    }

    /// Execute a recipe synchronously; the server blocks until the run
    /// completes and the returned handle is terminal. Same error policy as
    /// [`submit_recipe`](Self::submit_recipe).
    pub async fn execute_recipe(&self, recipe: &TestRecipe) -> ClientResult<Option<Execution>> {
        validate_data_source_files(recipe)?;

        let Some(mut report) = self.post_recipe(recipe, false).await else {
            return Ok(None);
        };

        if let Err(error) = self
            .upload_data_source_files(&report.execution_id, recipe)
            .await
        {
            tracing::error!(
                execution_id = %report.execution_id,
                error = %error,
                "Error uploading data source files"
            );
            self.inner.listeners.notify_error(&error);
            return Ok(None);
        }

        self.fail_fast_on_unresolved_files(&report, recipe).await?;

        {
            let extractors = self.inner.extractors.lock().expect("extractor lock poisoned");
            run_extractors(&extractors, &mut report);
        }

        let execution = Execution::new(report.clone());
        self.inner.listeners.notify_execution_finished(&report);
        Ok(Some(execution))
    }

    /// Request cancellation of a running execution. The resulting report is
    /// appended to the same handle. The status poller is not stopped by this
    /// call; it stops on its own once it observes a non-running status.
    pub async fn cancel_execution(&self, execution: &Execution) -> ClientResult<Execution> {
        let report = self.inner.api.cancel_execution(execution.id()).await?;
        execution.add_report(report);
        Ok(execution.clone())
    }

    /// List all executions known to the server as fresh handles
    pub async fn get_executions(&self) -> ClientResult<Vec<Execution>> {
        let reports = self.inner.api.get_executions().await?;
        Ok(reports.into_iter().map(Execution::new).collect())
    }

    async fn post_recipe(&self, recipe: &TestRecipe, run_async: bool) -> Option<ExecutionReport> {
        match self.inner.api.post_recipe(recipe, run_async).await {
            Ok(report) => Some(report),
            Err(error) => {
                tracing::error!(error = %error, "Error sending test recipe to server");
                self.inner.listeners.notify_error(&error);
                None
            }
        }
    }

    async fn upload_data_source_files(
        &self,
        execution_id: &str,
        recipe: &TestRecipe,
    ) -> ClientResult<()> {
        let files = recipe.data_source_files();
        if files.is_empty() {
            return Ok(());
        }

        let uploads = files.into_iter().map(|path| {
            let api = self.inner.api.clone();
            let execution_id = execution_id.to_string();
            async move {
                let content = tokio::fs::read(path).await?;
                let file_name = Path::new(path)
                    .file_name()
                    .and_then(OsStr::to_str)
                    .unwrap_or(path);
                api.upload_file(&execution_id, file_name, content).await
            }
        });

        try_join_all(uploads).await?;
        Ok(())
    }

    /// A pending report with unresolved file references means the server
    /// cannot run the recipe; cancel it and raise a descriptive error.
    async fn fail_fast_on_unresolved_files(
        &self,
        report: &ExecutionReport,
        recipe: &TestRecipe,
    ) -> ClientResult<()> {
        if report.status != ExecutionStatus::Pending || report.unresolved_files.is_empty() {
            return Ok(());
        }

        if let Err(error) = self.inner.api.cancel_execution(&report.execution_id).await {
            tracing::warn!(
                execution_id = %report.execution_id,
                error = %error,
                "Failed to cancel execution with unresolved files"
            );
        }

        let step_certificates = recipe.step_certificate_files();
        for unresolved in &report.unresolved_files {
            let file_name = unresolved.file_name.as_str();
            if recipe.test_case.client_cert_file_name.as_deref() == Some(file_name) {
                return Err(ClientError::Validation(format!(
                    "Couldn't find client certificate file: {}",
                    file_name
                )));
            }
            if step_certificates.contains(&file_name) {
                return Err(ClientError::Validation(format!(
                    "Couldn't find test step client certificate file: {}",
                    file_name
                )));
            }
        }

        let names: Vec<&str> = report
            .unresolved_files
            .iter()
            .map(|f| f.file_name.as_str())
            .collect();
        Err(ClientError::Validation(format!(
            "Couldn't resolve files on server: {}",
            names.join(", ")
        )))
    }
}

fn validate_data_source_files(recipe: &TestRecipe) -> ClientResult<()> {
    for path in recipe.data_source_files() {
        if !Path::new(path).exists() {
            return Err(ClientError::Validation(format!(
                "Data source file not found: {}",
                path
            )));
        }
    }
    Ok(())
}
