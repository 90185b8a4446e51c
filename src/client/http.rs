use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

use crate::client::TestServerApi;
use crate::config::TestServerConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{ExecutionReport, ExecutionReportList, TestRecipe};

/// HTTP implementation of the server API
pub struct HttpTestServerApi {
    client: Client,
    base_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl HttpTestServerApi {
    pub fn new(config: &TestServerConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn executions_url(&self) -> String {
        format!("{}/executions", self.base_url)
    }

    fn execution_url(&self, execution_id: &str) -> String {
        format!("{}/executions/{}", self.base_url, execution_id)
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.username {
            Some(username) => request.basic_auth(username, self.password.as_deref()),
            None => request,
        }
    }

    async fn parse_report(response: Response) -> ClientResult<ExecutionReport> {
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Map non-success responses to an API error carrying the response body
async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl TestServerApi for HttpTestServerApi {
    async fn post_recipe(
        &self,
        recipe: &TestRecipe,
        run_async: bool,
    ) -> ClientResult<ExecutionReport> {
        let request = self
            .client
            .post(self.executions_url())
            .query(&[("async", run_async)])
            .json(&recipe.test_case);

        let response = self.authenticated(request).send().await?;
        Self::parse_report(response).await
    }

    async fn get_execution_status(&self, execution_id: &str) -> ClientResult<ExecutionReport> {
        let request = self.client.get(self.execution_url(execution_id));
        let response = self.authenticated(request).send().await?;
        Self::parse_report(response).await
    }

    async fn cancel_execution(&self, execution_id: &str) -> ClientResult<ExecutionReport> {
        let request = self.client.delete(self.execution_url(execution_id));
        let response = self.authenticated(request).send().await?;
        Self::parse_report(response).await
    }

    async fn get_executions(&self) -> ClientResult<Vec<ExecutionReport>> {
        let request = self.client.get(self.executions_url());
        let response = self.authenticated(request).send().await?;
        let response = check_status(response).await?;
        let list: ExecutionReportList = response.json().await?;
        Ok(list.execution_reports)
    }

    async fn upload_file(
        &self,
        execution_id: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> ClientResult<()> {
        let part = reqwest::multipart::Part::bytes(content).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part(file_name.to_string(), part);

        let request = self
            .client
            .post(format!("{}/files", self.execution_url(execution_id)))
            .multipart(form);

        let response = self.authenticated(request).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
