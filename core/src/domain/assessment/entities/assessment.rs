use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{assessment::entities::ParsedResult, common::generate_timestamp};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Assessment {
    pub id: Uuid,
    pub input_type: InputType,
    pub outcome: AssessmentOutcome,
    pub raw_response: String,
    pub created_at: DateTime<Utc>,
}

/// Either a structured result or the model's "not a product label" answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssessmentOutcome {
    Assessed { result: ParsedResult },
    Irrelevant { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Image,
    Text,
}

impl InputType {
    pub fn as_str(&self) -> &str {
        match self {
            InputType::Image => "image",
            InputType::Text => "text",
        }
    }
}

impl AssessmentOutcome {
    pub fn result(&self) -> Option<&ParsedResult> {
        match self {
            AssessmentOutcome::Assessed { result } => Some(result),
            AssessmentOutcome::Irrelevant { .. } => None,
        }
    }
}

impl Assessment {
    pub fn new(input_type: InputType, outcome: AssessmentOutcome, raw_response: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            input_type,
            outcome,
            raw_response,
            created_at: now,
        }
    }
}
