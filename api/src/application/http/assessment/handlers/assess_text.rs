use axum::extract::State;
use greenlens_core::domain::assessment::{
    entities::Assessment, ports::AssessmentService, value_objects::AssessIngredientsInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    assessment::validators::AssessTextRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessmentResponse {
    pub data: Assessment,
}

#[utoipa::path(
    post,
    path = "/text",
    tag = "assessment",
    summary = "Assess an ingredient list",
    description = "Assesses a typed ingredient list for greenwashing",
    responses(
        (status = 200, body = AssessmentResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    ),
    request_body = AssessTextRequest
)]
pub async fn assess_text(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AssessTextRequest>,
) -> Result<Response<AssessmentResponse>, ApiError> {
    let assessment = state
        .service
        .assess_ingredients(AssessIngredientsInput::from_text(payload.text_input))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AssessmentResponse { data: assessment }))
}
