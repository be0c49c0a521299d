use tracing::{debug, info, instrument};

use crate::domain::{
    assessment::{entities::ParsedResult, ports::LLMClient},
    common::{entities::app_errors::CoreError, services::Service},
    report::{
        entities::{REPORT_FILE_NAME, ReportFile},
        ports::{DocumentWriter, ReportService},
    },
};

impl<LLM, DW> ReportService for Service<LLM, DW>
where
    LLM: LLMClient,
    DW: DocumentWriter,
{
    #[instrument(skip(self, result), fields(present = result.is_some()))]
    fn generate_report(
        &self,
        result: Option<&ParsedResult>,
    ) -> Result<Option<ReportFile>, CoreError> {
        let Some(result) = result else {
            debug!("No assessment result, skipping report");
            return Ok(None);
        };

        let document = self.paginator.render(result);
        let bytes = self.document_writer.write(&document)?;

        info!(
            pages = document.pages.len(),
            bytes = bytes.len(),
            "Report generated"
        );

        Ok(Some(ReportFile {
            file_name: REPORT_FILE_NAME.to_string(),
            content_type: self.document_writer.content_type().to_string(),
            bytes,
        }))
    }
}
