use axum::{
    extract::State,
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response as AxumResponse},
};
use greenlens_core::domain::report::ports::ReportService;

use crate::application::http::{
    report::validators::GenerateReportRequest,
    server::{
        api_entities::api_error::{ApiError, ApiErrorResponse, ValidateJson},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/reports",
    tag = "report",
    summary = "Download an assessment as PDF",
    description = "Paginates a parsed assessment result into a PDF report",
    responses(
        (status = 200, description = "PDF attachment (application/pdf)"),
        (status = 204, description = "No result was supplied"),
        (status = 400, body = ApiErrorResponse),
        (status = 500, body = ApiErrorResponse)
    ),
    request_body = GenerateReportRequest
)]
pub async fn generate_report(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<GenerateReportRequest>,
) -> Result<AxumResponse, ApiError> {
    let service = state.service.clone();
    let report =
        tokio::task::spawn_blocking(move || service.generate_report(payload.result.as_ref()))
            .await
            .map_err(|e| ApiError::InternalServerError(format!("Report task failed: {}", e)))?
            .map_err(ApiError::from)?;

    let Some(report) = report else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let disposition = format!("attachment; filename=\"{}\"", report.file_name);

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, report.content_type),
            (CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}
