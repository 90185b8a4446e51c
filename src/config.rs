use std::env;
use std::time::Duration;

/// Default interval between two status polls for an asynchronous execution.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Default timeout applied to every HTTP request sent to the server.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    /// Base URL of the test server, including the API prefix
    /// (e.g. "https://testserver.example.com:8443/v1")
    pub base_url: String,

    // Basic credentials sent with every request
    pub username: Option<String>,
    pub password: Option<String>,

    // Timing
    pub request_timeout: Duration,
    pub poll_interval: Duration,
}

impl TestServerConfig {
    /// Create a configuration with default timeouts and no credentials
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            username: None,
            password: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Ok(Self {
            base_url: env::var("TESTSERVER_URL").map_err(|_| ConfigError::Missing("TESTSERVER_URL"))?,

            username: env::var("TESTSERVER_USERNAME").ok(),
            password: env::var("TESTSERVER_PASSWORD").ok(),

            request_timeout: env::var("TESTSERVER_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::Invalid("TESTSERVER_TIMEOUT_SECONDS"))?,

            poll_interval: env::var("TESTSERVER_POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Invalid("TESTSERVER_POLL_INTERVAL_MS"))?,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TestServerConfig::new("https://localhost:8443/v1");
        assert_eq!(config.base_url, "https://localhost:8443/v1");
        assert!(config.username.is_none());
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_with_credentials() {
        let config =
            TestServerConfig::new("https://localhost:8443/v1").with_credentials("user", "password");
        assert_eq!(config.username.as_deref(), Some("user"));
        assert_eq!(config.password.as_deref(), Some("password"));
    }
}
