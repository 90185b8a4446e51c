use std::sync::{Arc, RwLock};

use time::OffsetDateTime;

use crate::models::{ExecutionReport, ExecutionStatus};
use crate::result::RecipeExecutionResult;

/// State of the background status poller attached to an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollingState {
    /// No poller attached (synchronous or listed executions)
    Idle,
    /// Poller is fetching status on its fixed cadence
    Polling,
    /// A non-running status was observed; polling stopped
    Finished,
    /// Too many consecutive fetch errors; polling gave up
    Abandoned,
}

impl PollingState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished | Self::Abandoned)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Polling => "polling",
            Self::Finished => "finished",
            Self::Abandoned => "abandoned",
        }
    }
}

/// Handle to one submitted recipe execution. Cheap to clone; all clones share
/// the same append-only report history.
#[derive(Clone)]
pub struct Execution {
    inner: Arc<ExecutionInner>,
}

struct ExecutionInner {
    id: String,
    submitted_at: OffsetDateTime,
    reports: RwLock<Vec<ExecutionReport>>,
    polling_state: RwLock<PollingState>,
}

impl Execution {
    pub(crate) fn new(initial_report: ExecutionReport) -> Self {
        Self {
            inner: Arc::new(ExecutionInner {
                id: initial_report.execution_id.clone(),
                submitted_at: OffsetDateTime::now_utc(),
                reports: RwLock::new(vec![initial_report]),
                polling_state: RwLock::new(PollingState::Idle),
            }),
        }
    }

    /// Server-assigned execution identifier
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn submitted_at(&self) -> OffsetDateTime {
        self.inner.submitted_at
    }

    /// The most recent status report (the last one appended)
    pub fn current_report(&self) -> ExecutionReport {
        self.inner
            .reports
            .read()
            .expect("reports lock poisoned")
            .last()
            .cloned()
            .expect("an execution always holds at least the initial report")
    }

    pub fn current_status(&self) -> ExecutionStatus {
        self.current_report().status
    }

    /// Number of reports received so far; monotonically non-decreasing
    pub fn report_count(&self) -> usize {
        self.inner.reports.read().expect("reports lock poisoned").len()
    }

    /// Full report history, oldest first
    pub fn report_history(&self) -> Vec<ExecutionReport> {
        self.inner.reports.read().expect("reports lock poisoned").clone()
    }

    pub(crate) fn add_report(&self, report: ExecutionReport) {
        self.inner
            .reports
            .write()
            .expect("reports lock poisoned")
            .push(report);
    }

    pub fn polling_state(&self) -> PollingState {
        *self
            .inner
            .polling_state
            .read()
            .expect("polling state lock poisoned")
    }

    pub(crate) fn set_polling_state(&self, state: PollingState) {
        *self
            .inner
            .polling_state
            .write()
            .expect("polling state lock poisoned") = state;
    }

    /// Flattened result view over the current report
    pub fn result(&self) -> RecipeExecutionResult {
        RecipeExecutionResult::from_report(self.current_report())
    }
}
