use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Execution status reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    /// Execution is queued but has not started (e.g. waiting for files)
    Pending,
    /// Execution is in progress
    Running,
    /// Execution completed
    Finished,
    /// Execution was cancelled on request
    Canceled,
    /// Execution failed server-side
    Failed,
}

impl ExecutionStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Canceled | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Finished => "FINISHED",
            Self::Canceled => "CANCELED",
            Self::Failed => "FAILED",
        }
    }
}

/// Assertion outcome of a single test step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssertionStatus {
    Passed,
    Failed,
    /// No assertions were evaluated for the step
    Unknown,
}

/// Status snapshot of one execution, produced by the server and never
/// mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub execution_id: String,
    pub status: ExecutionStatus,

    /// Elapsed execution time in milliseconds
    #[serde(default)]
    pub time_taken: i64,

    #[serde(default)]
    pub test_suite_reports: Vec<TestSuiteReport>,

    /// File references the server could not resolve (e.g. a missing client
    /// certificate); only meaningful while the execution is pending
    #[serde(default)]
    pub unresolved_files: Vec<UnresolvedFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuiteReport {
    #[serde(default)]
    pub test_suite_name: Option<String>,
    #[serde(default)]
    pub test_case_reports: Vec<TestCaseReport>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseReport {
    #[serde(default)]
    pub test_case_name: Option<String>,
    #[serde(default)]
    pub test_step_results: Vec<TestStepResult>,
    /// Result property bag; also carries extractor bookkeeping keys until
    /// they are stripped after extraction
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

/// Result of a single executed test step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStepResult {
    pub test_step_name: String,
    pub assertion_status: AssertionStatus,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub time_taken: i64,
}

/// A file referenced by the recipe that the server could not locate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedFile {
    pub file_name: String,
}

/// List wrapper returned when fetching all executions from the server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReportList {
    #[serde(default)]
    pub execution_reports: Vec<ExecutionReport>,
}
