use std::collections::HashMap;

use crate::models::{
    DataSource, DataSourceStep, ExcelDataSource, FileDataSource, TestStep,
};
use crate::recipe::TestStepBuilder;

pub fn grid_data_source() -> GridDataSourceBuilder {
    GridDataSourceBuilder::default()
}

pub fn file_data_source() -> FileDataSourceBuilder {
    FileDataSourceBuilder::default()
}

pub fn excel_data_source() -> ExcelDataSourceBuilder {
    ExcelDataSourceBuilder::default()
}

/// Inline grid of property values
#[derive(Default)]
pub struct GridDataSourceBuilder {
    name: Option<String>,
    grid: HashMap<String, Vec<String>>,
    properties: Vec<String>,
}

impl GridDataSourceBuilder {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn add_property(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        let name = name.into();
        self.properties.push(name.clone());
        self.grid.insert(name, values);
        self
    }
}

impl TestStepBuilder for GridDataSourceBuilder {
    fn build(self) -> TestStep {
        TestStep::DataSource(DataSourceStep {
            name: self.name,
            data_source: DataSource {
                properties: self.properties,
                grid: Some(self.grid),
                ..Default::default()
            },
        })
    }
}

/// CSV-style separated file source
#[derive(Default)]
pub struct FileDataSourceBuilder {
    name: Option<String>,
    properties: Vec<String>,
    file: FileDataSource,
}

impl FileDataSourceBuilder {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn add_property(mut self, name: impl Into<String>) -> Self {
        self.properties.push(name.into());
        self
    }

    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file.file = path.into();
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.file.charset = Some(charset.into());
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.file.separator = Some(separator.into());
        self
    }

    pub fn quoted_values(mut self) -> Self {
        self.file.quoted_values = true;
        self
    }

    pub fn trim(mut self) -> Self {
        self.file.trim = true;
        self
    }
}

impl TestStepBuilder for FileDataSourceBuilder {
    fn build(self) -> TestStep {
        TestStep::DataSource(DataSourceStep {
            name: self.name,
            data_source: DataSource {
                properties: self.properties,
                file: Some(self.file),
                ..Default::default()
            },
        })
    }
}

/// Excel worksheet source
#[derive(Default)]
pub struct ExcelDataSourceBuilder {
    name: Option<String>,
    properties: Vec<String>,
    excel: ExcelDataSource,
}

impl ExcelDataSourceBuilder {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn add_property(mut self, name: impl Into<String>) -> Self {
        self.properties.push(name.into());
        self
    }

    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.excel.file = path.into();
        self
    }

    pub fn with_worksheet(mut self, worksheet: impl Into<String>) -> Self {
        self.excel.worksheet = Some(worksheet.into());
        self
    }

    pub fn start_at_cell(mut self, cell: impl Into<String>) -> Self {
        self.excel.start_at_cell = Some(cell.into());
        self
    }

    pub fn ignore_empty(mut self) -> Self {
        self.excel.ignore_empty = true;
        self
    }
}

impl TestStepBuilder for ExcelDataSourceBuilder {
    fn build(self) -> TestStep {
        TestStep::DataSource(DataSourceStep {
            name: self.name,
            data_source: DataSource {
                properties: self.properties,
                excel: Some(self.excel),
                ..Default::default()
            },
        })
    }
}
