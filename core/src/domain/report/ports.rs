use crate::domain::{
    assessment::entities::ParsedResult,
    common::entities::app_errors::CoreError,
    report::entities::{Document, ReportFile},
};

/// Encodes a laid-out [`Document`] into a downloadable file format.
#[cfg_attr(test, mockall::automock)]
pub trait DocumentWriter: Send + Sync {
    fn content_type(&self) -> &'static str;

    fn write(&self, document: &Document) -> Result<Vec<u8>, CoreError>;
}

/// Service trait for report generation
pub trait ReportService: Send + Sync {
    /// Renders `result` into a report file. An absent result produces no file.
    fn generate_report(
        &self,
        result: Option<&ParsedResult>,
    ) -> Result<Option<ReportFile>, CoreError>;
}
