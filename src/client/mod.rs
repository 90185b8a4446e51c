pub mod http;
pub mod memory;

pub use http::HttpTestServerApi;
pub use memory::InMemoryTestServer;

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::models::{ExecutionReport, TestRecipe};

/// Server API boundary, abstracting the HTTP transport
/// Follows the async_trait seam pattern used for pluggable backends
#[async_trait]
pub trait TestServerApi: Send + Sync {
    /// Submit a recipe for execution; `run_async` makes the server return
    /// immediately with an initial report instead of blocking until done
    async fn post_recipe(&self, recipe: &TestRecipe, run_async: bool)
        -> ClientResult<ExecutionReport>;

    /// Fetch the current status report for an execution
    async fn get_execution_status(&self, execution_id: &str) -> ClientResult<ExecutionReport>;

    /// Request cancellation; returns the report taken after the request
    async fn cancel_execution(&self, execution_id: &str) -> ClientResult<ExecutionReport>;

    /// List the current reports of all executions known to the server
    async fn get_executions(&self) -> ClientResult<Vec<ExecutionReport>>;

    /// Upload a file referenced by a submitted recipe (multipart form data)
    async fn upload_file(
        &self,
        execution_id: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> ClientResult<()>;
}
