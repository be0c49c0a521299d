use axum::extract::{Multipart, State};
use bytes::Bytes;
use greenlens_core::domain::assessment::{
    ports::AssessmentService,
    value_objects::{AssessIngredientsInput, ImageInput},
};
use tracing::error;

use crate::application::http::{
    assessment::{
        handlers::assess_text::AssessmentResponse,
        validators::{AssessImageForm, MAX_TEXT_INPUT_CHARS},
    },
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[utoipa::path(
    post,
    path = "/image",
    tag = "assessment",
    summary = "Assess an ingredient label photo",
    description = "Assesses a label photo, with optional text, for greenwashing",
    responses(
        (status = 200, body = AssessmentResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 415, body = ApiErrorResponse),
        (status = 502, body = ApiErrorResponse)
    ),
    request_body(
        content = AssessImageForm,
        content_type = "multipart/form-data"
    )
)]
pub async fn assess_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AssessmentResponse>, ApiError> {
    let mut text_input: Option<String> = None;
    let mut image_data: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error!("Failed to read multipart field: {}", e);
        ApiError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "text_input" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read text_input: {}", e))
                })?;

                if value.chars().count() as u64 > MAX_TEXT_INPUT_CHARS {
                    return Err(ApiError::ValidationError(format!(
                        "text_input must be at most {} characters",
                        MAX_TEXT_INPUT_CHARS
                    )));
                }

                text_input = Some(value);
            }
            "image" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(ApiError::BadRequest(format!(
                        "Image too large. Max size is {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }

                image_data = Some(data);
            }
            _ => {}
        }
    }

    let image_data =
        image_data.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;
    let image = ImageInput::from_bytes(image_data).map_err(ApiError::from)?;

    let assessment = state
        .service
        .assess_ingredients(AssessIngredientsInput {
            text_input,
            image: Some(image),
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AssessmentResponse { data: assessment }))
}
