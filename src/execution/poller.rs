use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::client::TestServerApi;
use crate::error::ClientError;
use crate::execution::handle::{Execution, PollingState};
use crate::execution::listener::ListenerSet;
use crate::extractor::{run_extractors, ExtractorData};

/// Consecutive fetch failures tolerated before polling is abandoned; the
/// failure after this many gives up.
pub(crate) const MAX_CONSECUTIVE_POLL_ERRORS: u32 = 3;

/// Periodic status checker for one asynchronous execution.
///
/// Fetches the status report on a fixed cadence, starting immediately. Each
/// tick runs to completion before the next is scheduled, so ticks never
/// overlap for the same execution; separate executions poll independently.
pub(crate) struct StatusPoller {
    pub api: Arc<dyn TestServerApi>,
    pub execution: Execution,
    pub listeners: ListenerSet,
    pub extractors: Arc<Mutex<Vec<ExtractorData>>>,
    pub poll_interval: Duration,
}

impl StatusPoller {
    /// Detach the poller onto the runtime; it stops itself on a terminal
    /// status or once the error budget is exhausted
    pub fn spawn(self) {
        self.execution.set_polling_state(PollingState::Polling);
        tokio::spawn(self.run());
    }

    async fn run(self) {
        let mut interval = tokio::time::interval(self.poll_interval);
        let mut error_count: u32 = 0;

        loop {
            interval.tick().await;

            match self.api.get_execution_status(self.execution.id()).await {
                Ok(mut report) => {
                    error_count = 0;

                    if report.status.is_running() {
                        self.execution.add_report(report);
                        continue;
                    }

                    // Terminal report: extract registered properties before
                    // the report becomes visible to anyone else
                    {
                        let extractors =
                            self.extractors.lock().expect("extractor lock poisoned");
                        run_extractors(&extractors, &mut report);
                    }

                    self.execution.add_report(report.clone());
                    self.execution.set_polling_state(PollingState::Finished);
                    tracing::debug!(
                        execution_id = %self.execution.id(),
                        status = report.status.as_str(),
                        "Execution left the running state, polling stopped"
                    );
                    self.listeners.notify_execution_finished(&report);
                    return;
                }
                Err(error) => {
                    error_count += 1;
                    tracing::debug!(
                        execution_id = %self.execution.id(),
                        error = %error,
                        consecutive_errors = error_count,
                        "Error while checking execution status"
                    );

                    if error_count > MAX_CONSECUTIVE_POLL_ERRORS {
                        self.execution.set_polling_state(PollingState::Abandoned);
                        let abandoned = ClientError::PollingAbandoned {
                            execution_id: self.execution.id().to_string(),
                            errors: error_count,
                        };
                        tracing::warn!(
                            execution_id = %self.execution.id(),
                            consecutive_errors = error_count,
                            "Giving up on status polling"
                        );
                        self.listeners.notify_error(&abandoned);
                        return;
                    }
                }
            }
        }
    }
}
