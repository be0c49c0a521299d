use std::future::Future;

use crate::domain::{
    assessment::{
        entities::Assessment,
        value_objects::{AssessIngredientsInput, ImageInput, LLMResponse},
    },
    common::entities::app_errors::CoreError,
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image: ImageInput,
    ) -> impl Future<Output = Result<LLMResponse, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
    ) -> impl Future<Output = Result<LLMResponse, CoreError>> + Send;
}

/// Service trait for ingredient assessment
#[cfg_attr(test, mockall::automock)]
pub trait AssessmentService: Send + Sync {
    fn assess_ingredients(
        &self,
        input: AssessIngredientsInput,
    ) -> impl Future<Output = Result<Assessment, CoreError>> + Send;
}
