use greenlens_core::domain::assessment::entities::ParsedResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct GenerateReportRequest {
    /// Result of a previous assessment; `null` produces no report
    #[serde(default)]
    pub result: Option<ParsedResult>,
}
