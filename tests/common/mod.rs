#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use testserver_client::models::{
    AssertionStatus, ExecutionReport, ExecutionStatus, TestCaseReport, TestStepResult,
    TestSuiteReport, UnresolvedFile,
};
use testserver_client::{
    ClientError, Execution, ExecutionListener, InMemoryTestServer, RecipeExecutor,
};

/// Lifecycle event captured by the recording listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerEvent {
    RequestSent {
        execution_id: String,
    },
    ExecutionFinished {
        execution_id: String,
        status: ExecutionStatus,
    },
    ErrorOccurred {
        message: String,
        abandoned: bool,
    },
}

/// Listener that records every notification it receives, in order
#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<ListenerEvent>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<ListenerEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn finished_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ListenerEvent::ExecutionFinished { .. }))
            .count()
    }

    fn push(&self, event: ListenerEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ExecutionListener for RecordingListener {
    fn request_sent(&self, report: &ExecutionReport) {
        self.push(ListenerEvent::RequestSent {
            execution_id: report.execution_id.clone(),
        });
    }

    fn execution_finished(&self, report: &ExecutionReport) {
        self.push(ListenerEvent::ExecutionFinished {
            execution_id: report.execution_id.clone(),
            status: report.status,
        });
    }

    fn error_occurred(&self, error: &ClientError) {
        self.push(ListenerEvent::ErrorOccurred {
            message: error.to_string(),
            abandoned: matches!(error, ClientError::PollingAbandoned { .. }),
        });
    }
}

/// Executor wired to an in-memory server with a recording listener attached
pub struct TestHarness {
    pub server: InMemoryTestServer,
    pub executor: RecipeExecutor,
    pub listener: Arc<RecordingListener>,
}

impl TestHarness {
    pub fn new() -> Self {
        // Short interval keeps unpaused tests fast
        Self::with_poll_interval(Duration::from_millis(20))
    }

    pub fn with_poll_interval(poll_interval: Duration) -> Self {
        init_tracing();
        let server = InMemoryTestServer::new();
        let executor = RecipeExecutor::with_api(Arc::new(server.clone()), poll_interval);
        let listener = Arc::new(RecordingListener::default());
        executor.add_execution_listener(listener.clone());
        Self {
            server,
            executor,
            listener,
        }
    }

    /// Wait until the execution's poller reaches a terminal state
    pub async fn wait_for_terminal(&self, execution: &Execution) {
        for _ in 0..1000 {
            if execution.polling_state().is_terminal() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "poller for execution {} did not reach a terminal state",
            execution.id()
        );
    }
}

/// Initialize tracing once for the test binary; honors RUST_LOG
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

// ============ Report factories ============

pub fn report(execution_id: &str, status: ExecutionStatus) -> ExecutionReport {
    ExecutionReport {
        execution_id: execution_id.to_string(),
        status,
        time_taken: 0,
        test_suite_reports: Vec::new(),
        unresolved_files: Vec::new(),
    }
}

pub fn report_with_steps(
    execution_id: &str,
    status: ExecutionStatus,
    steps: Vec<TestStepResult>,
) -> ExecutionReport {
    let mut report = report(execution_id, status);
    report.test_suite_reports = vec![TestSuiteReport {
        test_suite_name: None,
        test_case_reports: vec![TestCaseReport {
            test_case_name: None,
            test_step_results: steps,
            properties: Default::default(),
        }],
    }];
    report
}

pub fn report_with_properties(
    execution_id: &str,
    status: ExecutionStatus,
    properties: std::collections::HashMap<String, String>,
) -> ExecutionReport {
    let mut report = report(execution_id, status);
    report.test_suite_reports = vec![TestSuiteReport {
        test_suite_name: None,
        test_case_reports: vec![TestCaseReport {
            test_case_name: None,
            test_step_results: Vec::new(),
            properties,
        }],
    }];
    report
}

pub fn report_with_unresolved_files(
    execution_id: &str,
    file_names: &[&str],
) -> ExecutionReport {
    let mut report = report(execution_id, ExecutionStatus::Pending);
    report.unresolved_files = file_names
        .iter()
        .map(|name| UnresolvedFile {
            file_name: name.to_string(),
        })
        .collect();
    report
}

pub fn step(name: &str, status: AssertionStatus, messages: &[&str]) -> TestStepResult {
    TestStepResult {
        test_step_name: name.to_string(),
        assertion_status: status,
        messages: messages.iter().map(|m| m.to_string()).collect(),
        time_taken: 5,
    }
}
