use utoipa::OpenApi;

use crate::application::http::{
    assessment::router::AssessmentApiDoc, health::HealthApiDoc, report::router::ReportApiDoc,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Greenlens API"
    ),
    nest(
        (path = "/assessments", api = AssessmentApiDoc),
    ),
    tags(
        (name = "assessment", description = "Greenwashing assessment of product labels"),
        (name = "report", description = "PDF export of assessments"),
        (name = "health", description = "Service status")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Full document including the routes that are not nested.
    pub fn document() -> utoipa::openapi::OpenApi {
        ApiDoc::openapi()
            .merge_from(ReportApiDoc::openapi())
            .merge_from(HealthApiDoc::openapi())
    }
}
