use std::sync::{Arc, RwLock};

use crate::error::ClientError;
use crate::models::ExecutionReport;

/// Receives execution lifecycle events. Callbacks run on the poller task of
/// the execution they concern and must not block indefinitely.
pub trait ExecutionListener: Send + Sync {
    /// An asynchronous submission was accepted by the server
    fn request_sent(&self, _report: &ExecutionReport) {}

    /// A non-running status was observed; `report` is the final report
    fn execution_finished(&self, _report: &ExecutionReport) {}

    /// A submission failed, or status polling was abandoned
    fn error_occurred(&self, _error: &ClientError) {}
}

/// Listener registry. Notification iterates over a snapshot taken under the
/// lock, so listeners can be added or removed concurrently with delivery.
#[derive(Clone, Default)]
pub(crate) struct ListenerSet {
    listeners: Arc<RwLock<Vec<Arc<dyn ExecutionListener>>>>,
}

impl ListenerSet {
    pub fn add(&self, listener: Arc<dyn ExecutionListener>) {
        self.listeners
            .write()
            .expect("listener lock poisoned")
            .push(listener);
    }

    /// Remove a previously added listener, matched by identity
    pub fn remove(&self, listener: &Arc<dyn ExecutionListener>) {
        self.listeners
            .write()
            .expect("listener lock poisoned")
            .retain(|registered| !Arc::ptr_eq(registered, listener));
    }

    fn snapshot(&self) -> Vec<Arc<dyn ExecutionListener>> {
        self.listeners
            .read()
            .expect("listener lock poisoned")
            .clone()
    }

    pub fn notify_request_sent(&self, report: &ExecutionReport) {
        for listener in self.snapshot() {
            listener.request_sent(report);
        }
    }

    pub fn notify_execution_finished(&self, report: &ExecutionReport) {
        for listener in self.snapshot() {
            listener.execution_finished(report);
        }
    }

    pub fn notify_error(&self, error: &ClientError) {
        for listener in self.snapshot() {
            listener.error_occurred(error);
        }
    }
}
