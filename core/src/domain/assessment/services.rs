use tracing::{info, instrument, warn};

use crate::domain::{
    assessment::{
        entities::{Assessment, AssessmentOutcome},
        parser::parse_response,
        ports::{AssessmentService, LLMClient},
        prompt::{IRRELEVANT_INPUT_MESSAGE, build_assessment_prompt},
        value_objects::AssessIngredientsInput,
    },
    common::{entities::app_errors::CoreError, services::Service},
    report::ports::DocumentWriter,
};

impl<LLM, DW> AssessmentService for Service<LLM, DW>
where
    LLM: LLMClient,
    DW: DocumentWriter,
{
    #[instrument(skip(self, input), fields(input_type = input.input_type().as_str()))]
    async fn assess_ingredients(
        &self,
        input: AssessIngredientsInput,
    ) -> Result<Assessment, CoreError> {
        input.validate()?;

        let input_type = input.input_type();
        let prompt = build_assessment_prompt(&input);

        // Single request per submission, failures surface to the caller as-is
        let response = match input.image {
            Some(image) => self.llm_client.generate_with_image(prompt, image).await?,
            None => self.llm_client.generate_with_text(prompt).await?,
        };

        let outcome = match parse_response(&response.text) {
            Some(mut result) => {
                result.grounding_urls = response.grounding_urls;
                info!(
                    sections = result.populated_sections(),
                    grounding_urls = result.grounding_urls.len(),
                    "Assessment parsed"
                );
                AssessmentOutcome::Assessed { result }
            }
            None => {
                warn!("Input was not recognized as a product label");
                AssessmentOutcome::Irrelevant {
                    message: IRRELEVANT_INPUT_MESSAGE.to_string(),
                }
            }
        };

        Ok(Assessment::new(input_type, outcome, response.text))
    }
}
