use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::generate_report::{__path_generate_report, generate_report};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(generate_report))]
pub struct ReportApiDoc;

pub fn report_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/reports", state.args.server.root_path),
        post(generate_report),
    )
}
