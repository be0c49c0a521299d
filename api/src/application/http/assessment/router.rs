use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    assess_image::{__path_assess_image, MAX_IMAGE_SIZE, assess_image},
    assess_text::{__path_assess_text, assess_text},
};
use crate::application::http::server::app_state::AppState;

// multipart framing and the optional text field on top of the image
const MAX_IMAGE_BODY_SIZE: usize = MAX_IMAGE_SIZE + 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(assess_text, assess_image))]
pub struct AssessmentApiDoc;

pub fn assessment_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/assessments/text", state.args.server.root_path),
            post(assess_text),
        )
        .route(
            &format!("{}/assessments/image", state.args.server.root_path),
            post(assess_image).layer(DefaultBodyLimit::max(MAX_IMAGE_BODY_SIZE)),
        )
}
