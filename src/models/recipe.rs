use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::auth::Authentication;

/// A declarative test case submitted for execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecipe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub test_case: TestCase,
}

impl TestRecipe {
    /// Local paths of every file-backed data source referenced by the recipe.
    /// These files must exist client-side and are uploaded after submission.
    pub fn data_source_files(&self) -> Vec<&str> {
        self.test_case
            .test_steps
            .iter()
            .filter_map(|step| match step {
                TestStep::DataSource(step) => step.data_source.file_path(),
                _ => None,
            })
            .collect()
    }

    /// Client certificate file names referenced by individual request steps
    pub fn step_certificate_files(&self) -> Vec<&str> {
        self.test_case
            .test_steps
            .iter()
            .filter_map(|step| match step {
                TestStep::RestRequest(step) => step.client_certificate_file_name.as_deref(),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default)]
    pub test_steps: Vec<TestStep>,

    /// Certificate used for every request step unless overridden per step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_cert_file_name: Option<String>,

    #[serde(default)]
    pub fail_test_case_on_error: bool,
}

/// One step of a test case, tagged on the wire by its `type`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TestStep {
    #[serde(rename = "REST Request")]
    RestRequest(RestRequestStep),
    #[serde(rename = "DataSource")]
    DataSource(DataSourceStep),
}

impl TestStep {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::RestRequest(step) => step.name.as_deref(),
            Self::DataSource(step) => step.name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestRequestStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub method: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<RequestParameter>,
    /// Credentials the server presents to the API under test
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<Authentication>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_certificate_file_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameter {
    pub name: String,
    pub value: String,
    pub kind: ParameterKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterKind {
    Query,
    Path,
    Header,
}

/// A step that feeds rows of input data into the following steps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceStep {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub data_source: DataSource,
}

/// Exactly one of the source kinds is populated; `properties` lists the
/// property names the source exposes to subsequent steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileDataSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excel: Option<ExcelDataSource>,
}

impl DataSource {
    /// Local file path backing this source, if it is file-backed
    pub fn file_path(&self) -> Option<&str> {
        if let Some(file) = &self.file {
            return Some(&file.file);
        }
        if let Some(excel) = &self.excel {
            return Some(&excel.file);
        }
        None
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDataSource {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(default)]
    pub quoted_values: bool,
    #[serde(default)]
    pub trim: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelDataSource {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worksheet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at_cell: Option<String>,
    #[serde(default)]
    pub ignore_empty: bool,
}
