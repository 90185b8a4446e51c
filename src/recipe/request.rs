use crate::models::{Authentication, ParameterKind, RequestParameter, RestRequestStep, TestStep};
use crate::recipe::TestStepBuilder;

pub fn get_request(uri: impl Into<String>) -> RestRequestStepBuilder {
    RestRequestStepBuilder::new("GET", uri)
}

pub fn post_request(uri: impl Into<String>) -> RestRequestStepBuilder {
    RestRequestStepBuilder::new("POST", uri)
}

pub fn put_request(uri: impl Into<String>) -> RestRequestStepBuilder {
    RestRequestStepBuilder::new("PUT", uri)
}

pub fn delete_request(uri: impl Into<String>) -> RestRequestStepBuilder {
    RestRequestStepBuilder::new("DELETE", uri)
}

pub struct RestRequestStepBuilder {
    step: RestRequestStep,
}

impl RestRequestStepBuilder {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            step: RestRequestStep {
                method: method.into(),
                uri: uri.into(),
                ..Default::default()
            },
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.step.name = Some(name.into());
        self
    }

    pub fn add_query_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.step.parameters.push(RequestParameter {
            name: name.into(),
            value: value.into(),
            kind: ParameterKind::Query,
        });
        self
    }

    pub fn add_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.step.parameters.push(RequestParameter {
            name: name.into(),
            value: value.into(),
            kind: ParameterKind::Path,
        });
        self
    }

    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.step
            .headers
            .entry(name.into())
            .or_default()
            .push(value.into());
        self
    }

    /// Credentials the server presents to the API under test
    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.step.authentication = Some(authentication);
        self
    }

    /// Certificate used for this step only, overriding the test case default
    pub fn with_client_certificate(mut self, file_name: impl Into<String>) -> Self {
        self.step.client_certificate_file_name = Some(file_name.into());
        self
    }
}

impl TestStepBuilder for RestRequestStepBuilder {
    fn build(self) -> TestStep {
        TestStep::RestRequest(self.step)
    }
}
