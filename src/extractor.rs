use std::collections::HashMap;

use uuid::Uuid;

use crate::models::ExecutionReport;

/// Property key the server echoes back to associate a result-properties bag
/// with the extractor data registered for the submission
pub const EXTRACTOR_DATA_KEY: &str = "extractorData";

/// Callback invoked with an extracted property value
pub type ExtractorOperator = Box<dyn Fn(&str) + Send + Sync>;

/// A keyed set of operators that pull named values out of an execution's
/// result properties; lives for the span of one execution.
pub struct ExtractorData {
    id: String,
    operators: HashMap<String, ExtractorOperator>,
}

impl ExtractorData {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            operators: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn add_operator<F>(mut self, property: impl Into<String>, operator: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.operators.insert(property.into(), Box::new(operator));
        self
    }

    fn operator(&self, property: &str) -> Option<&ExtractorOperator> {
        self.operators.get(property)
    }
}

impl Default for ExtractorData {
    fn default() -> Self {
        Self::new()
    }
}

/// Locate the result-properties bag matching a registered extractor-data id,
/// invoke the registered operators with the property values, then strip the
/// extractor bookkeeping keys from the bag. No matching bag means no-op.
pub(crate) fn run_extractors(extractor_data: &[ExtractorData], report: &mut ExecutionReport) {
    for case_report in report
        .test_suite_reports
        .iter_mut()
        .flat_map(|suite| suite.test_case_reports.iter_mut())
    {
        let Some(id) = case_report.properties.get(EXTRACTOR_DATA_KEY).cloned() else {
            continue;
        };
        let Some(data) = extractor_data.iter().find(|data| data.id() == id) else {
            continue;
        };

        for (property, value) in &case_report.properties {
            if let Some(operator) = data.operator(property) {
                operator(value);
            }
        }

        // Extraction done, drop the bookkeeping entries
        case_report
            .properties
            .retain(|property, _| !property.contains(id.as_str()));
        case_report.properties.remove(EXTRACTOR_DATA_KEY);
        return;
    }
}
