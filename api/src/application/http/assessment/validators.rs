use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const MAX_TEXT_INPUT_CHARS: u64 = 5000;

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AssessTextRequest {
    #[validate(length(
        min = 1,
        max = MAX_TEXT_INPUT_CHARS,
        message = "text_input must be between 1 and 5000 characters"
    ))]
    pub text_input: String,
}

/// Documents the multipart body of the image endpoint.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct AssessImageForm {
    /// PNG, JPEG, WEBP, HEIC or HEIF, at most 10 MiB
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    /// Extra context typed by the user
    pub text_input: Option<String>,
}
