use crate::domain::assessment::value_objects::AssessIngredientsInput;

/// Exact answer the model gives when the input is not an ingredient list.
pub const IRRELEVANT_INPUT_MESSAGE: &str = "Input not recognized as a product label. \
    Please provide a product's ingredient list as text or a clear photo of its ingredient label.";

const IMAGE_INPUT_CONTENT: &str = "the ingredient label shown in the attached image";

pub const ASSESSMENT_PROMPT_TEMPLATE: &str = r#"You are a sustainability analyst
reviewing consumer product labels for greenwashing.

Analyse {input_content}.

Use web search to check marketing claims, certifications and ingredient sourcing where it helps.
Judge each environmental or "natural" claim against the ingredients. Use cautious, factual language
and never state that a product is harmful without evidence.

If the input is not a product label or ingredient list, answer with exactly this sentence
and nothing else:
{irrelevant_message}

Otherwise answer in plain text (no Markdown) using exactly these section headers,
each on its own line:

<icon> <short risk summary>
Overall Verdict:
<one line verdict>
Greenwashing Risk:
<XX% (Low/Medium/High/Critical)>
Claims that failed to meet expectations:
- <claim>
Why these claims failed:
- <reason>
Ingredients to note:
- <ingredient>
More details:
<one or more paragraphs>
Ingredient-specific details:
<ingredient name>:
<explanation>
Improvement suggestions:
- <suggestion>

The icon is ✅ for low risk, 🟠 for medium risk and ❌ for high or critical risk.
Leave a list section with no "- " lines when nothing applies."#;

/// Builds the prompt for one assessment request.
pub fn build_assessment_prompt(input: &AssessIngredientsInput) -> String {
    let input_content = match (input.text(), input.image.is_some()) {
        (Some(text), true) => format!(
            "{} together with this additional text from the user:\n{}",
            IMAGE_INPUT_CONTENT, text
        ),
        (Some(text), false) => format!("this ingredient list:\n{}", text),
        (None, _) => IMAGE_INPUT_CONTENT.to_string(),
    };

    ASSESSMENT_PROMPT_TEMPLATE
        .replace("{irrelevant_message}", IRRELEVANT_INPUT_MESSAGE)
        .replace("{input_content}", &input_content)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::domain::assessment::value_objects::{ImageFormat, ImageInput};

    #[test]
    fn test_text_prompt_embeds_ingredients() {
        let input = AssessIngredientsInput::from_text("Aqua, Glycerin");
        let prompt = build_assessment_prompt(&input);

        assert!(prompt.contains("this ingredient list:\nAqua, Glycerin"));
        assert!(prompt.contains(IRRELEVANT_INPUT_MESSAGE));
        assert!(!prompt.contains("{input_content}"));
    }

    #[test]
    fn test_image_prompt_mentions_attachment() {
        let input = AssessIngredientsInput {
            text_input: None,
            image: Some(ImageInput {
                data: Bytes::from_static(b"\x89PNG\r\n\x1a\n"),
                format: ImageFormat::Png,
            }),
        };
        let prompt = build_assessment_prompt(&input);

        assert!(prompt.contains(IMAGE_INPUT_CONTENT));
        assert!(!prompt.contains("additional text"));
    }
}
