// Client library for a remote test-execution server: build test recipes,
// submit them (sync or async), poll execution status and expose results.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod execution;
pub mod extractor;
pub mod models;
pub mod recipe;
pub mod result;

pub use auth::{CredentialsKind, CredentialsSpec};
pub use client::{HttpTestServerApi, InMemoryTestServer, TestServerApi};
pub use config::TestServerConfig;
pub use error::{ClientError, ClientResult};
pub use execution::{Execution, ExecutionListener, PollingState, RecipeExecutor};
pub use extractor::ExtractorData;
pub use result::RecipeExecutionResult;
