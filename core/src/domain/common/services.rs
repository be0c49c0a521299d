use crate::domain::{
    assessment::ports::LLMClient,
    report::{paginator::ReportPaginator, ports::DocumentWriter},
};

/// Application service wiring the outbound ports together.
///
/// Feature traits (`AssessmentService`, `ReportService`) are implemented on
/// this type in their own modules.
#[derive(Clone)]
pub struct Service<LLM, DW>
where
    LLM: LLMClient,
    DW: DocumentWriter,
{
    pub(crate) llm_client: LLM,
    pub(crate) document_writer: DW,
    pub(crate) paginator: ReportPaginator,
}

impl<LLM, DW> Service<LLM, DW>
where
    LLM: LLMClient,
    DW: DocumentWriter,
{
    pub fn new(llm_client: LLM, document_writer: DW) -> Self {
        Self {
            llm_client,
            document_writer,
            paginator: ReportPaginator::default(),
        }
    }

    pub fn with_paginator(mut self, paginator: ReportPaginator) -> Self {
        self.paginator = paginator;
        self
    }
}
