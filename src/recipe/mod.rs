pub mod datasource;
pub mod request;

pub use datasource::{
    excel_data_source, file_data_source, grid_data_source, ExcelDataSourceBuilder,
    FileDataSourceBuilder, GridDataSourceBuilder,
};
pub use request::{delete_request, get_request, post_request, put_request, RestRequestStepBuilder};

use crate::models::{TestCase, TestRecipe, TestStep};

/// Builds one step of a test case
pub trait TestStepBuilder {
    fn build(self) -> TestStep;
}

/// Entry point of the recipe DSL
pub fn new_test_recipe() -> TestRecipeBuilder {
    TestRecipeBuilder::default()
}

#[derive(Default)]
pub struct TestRecipeBuilder {
    name: Option<String>,
    steps: Vec<TestStep>,
    client_cert_file_name: Option<String>,
    fail_test_case_on_error: bool,
}

impl TestRecipeBuilder {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn add_step(mut self, step: impl TestStepBuilder) -> Self {
        self.steps.push(step.build());
        self
    }

    /// Certificate applied to every request step of the test case
    pub fn with_client_certificate(mut self, file_name: impl Into<String>) -> Self {
        self.client_cert_file_name = Some(file_name.into());
        self
    }

    pub fn fail_on_error(mut self) -> Self {
        self.fail_test_case_on_error = true;
        self
    }

    pub fn build(self) -> TestRecipe {
        TestRecipe {
            name: self.name,
            test_case: TestCase {
                test_steps: self.steps,
                client_cert_file_name: self.client_cert_file_name,
                fail_test_case_on_error: self.fail_test_case_on_error,
            },
        }
    }
}
