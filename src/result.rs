use crate::models::{AssertionStatus, ExecutionReport, ExecutionStatus, TestStepResult};

/// Flattened view over one status report: test suites, test cases and test
/// steps collapsed into a single ordered sequence of per-step results.
#[derive(Debug, Clone)]
pub struct RecipeExecutionResult {
    report: ExecutionReport,
    results: Vec<TestStepResult>,
}

impl RecipeExecutionResult {
    pub fn from_report(report: ExecutionReport) -> Self {
        let results = report
            .test_suite_reports
            .iter()
            .flat_map(|suite| suite.test_case_reports.iter())
            .flat_map(|case| case.test_step_results.iter())
            .cloned()
            .collect();

        Self { report, results }
    }

    pub fn execution_id(&self) -> &str {
        &self.report.execution_id
    }

    pub fn status(&self) -> ExecutionStatus {
        self.report.status
    }

    /// Elapsed execution time in milliseconds
    pub fn time_taken(&self) -> i64 {
        self.report.time_taken
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// All per-step results, in encounter order
    pub fn test_step_results(&self) -> &[TestStepResult] {
        &self.results
    }

    pub fn test_step_result(&self, index: usize) -> Option<&TestStepResult> {
        self.results.get(index)
    }

    /// First result with the given step name, case-insensitively
    pub fn first_test_step_result(&self, name: &str) -> Option<&TestStepResult> {
        self.results
            .iter()
            .find(|result| result.test_step_name.eq_ignore_ascii_case(name))
    }

    /// Last result with the given step name, case-insensitively
    pub fn last_test_step_result(&self, name: &str) -> Option<&TestStepResult> {
        self.results
            .iter()
            .rev()
            .find(|result| result.test_step_name.eq_ignore_ascii_case(name))
    }

    /// All results with the given step name, case-insensitively, in order
    pub fn test_step_results_named(&self, name: &str) -> Vec<&TestStepResult> {
        self.results
            .iter()
            .filter(|result| result.test_step_name.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Results of steps whose assertions failed, in encounter order
    pub fn failed_test_steps_results(&self) -> Vec<&TestStepResult> {
        self.results
            .iter()
            .filter(|result| result.assertion_status == AssertionStatus::Failed)
            .collect()
    }

    pub fn failed_test_steps_results_named(&self, name: &str) -> Vec<&TestStepResult> {
        self.results
            .iter()
            .filter(|result| {
                result.assertion_status == AssertionStatus::Failed
                    && result.test_step_name.eq_ignore_ascii_case(name)
            })
            .collect()
    }

    /// Failure messages of all failed steps, in encounter order
    pub fn error_messages(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|result| result.assertion_status == AssertionStatus::Failed)
            .flat_map(|result| result.messages.iter().cloned())
            .collect()
    }
}
