use tracing::debug;

use crate::domain::assessment::{
    entities::{IngredientDetail, ParsedResult, RiskIcon},
    prompt::IRRELEVANT_INPUT_MESSAGE,
};

pub const OVERALL_VERDICT_HEADER: &str = "Overall Verdict:";
pub const GREENWASHING_RISK_HEADER: &str = "Greenwashing Risk:";
pub const CLAIMS_FAILED_HEADER: &str = "Claims that failed to meet expectations:";
pub const WHY_CLAIMS_FAILED_HEADER: &str = "Why these claims failed:";
pub const INGREDIENTS_TO_NOTE_HEADER: &str = "Ingredients to note:";
pub const MORE_DETAILS_HEADER: &str = "More details:";
pub const INGREDIENT_DETAILS_HEADER: &str = "Ingredient-specific details:";
pub const IMPROVEMENT_SUGGESTIONS_HEADER: &str = "Improvement suggestions:";

const BULLET_PREFIX: &str = "- ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Header {
    OverallVerdict,
    GreenwashingRisk,
    ClaimsFailed,
    WhyClaimsFailed,
    IngredientsToNote,
    MoreDetails,
    IngredientDetails,
    ImprovementSuggestions,
}

const HEADERS: [(&str, Header); 8] = [
    (OVERALL_VERDICT_HEADER, Header::OverallVerdict),
    (GREENWASHING_RISK_HEADER, Header::GreenwashingRisk),
    (CLAIMS_FAILED_HEADER, Header::ClaimsFailed),
    (WHY_CLAIMS_FAILED_HEADER, Header::WhyClaimsFailed),
    (INGREDIENTS_TO_NOTE_HEADER, Header::IngredientsToNote),
    (MORE_DETAILS_HEADER, Header::MoreDetails),
    (INGREDIENT_DETAILS_HEADER, Header::IngredientDetails),
    (
        IMPROVEMENT_SUGGESTIONS_HEADER,
        Header::ImprovementSuggestions,
    ),
];

impl Header {
    /// Case-sensitive literal prefix match on an already trimmed line.
    fn recognize(line: &str) -> Option<Header> {
        HEADERS
            .iter()
            .find(|(literal, _)| line.starts_with(literal))
            .map(|(_, header)| *header)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BulletList {
    ClaimsFailed,
    WhyClaimsFailed,
    IngredientsToNote,
    ImprovementSuggestions,
}

/// Section currently being accumulated. Each variant owns the buffer it
/// fills; the buffer is flushed into the result when the section closes.
#[derive(Debug)]
enum Section {
    None,
    Bullets(BulletList),
    MoreDetails(String),
    IngredientDetails(Option<IngredientDetail>),
}

#[derive(Debug)]
struct ParseState {
    result: ParsedResult,
    section: Section,
}

impl ParseState {
    fn new() -> Self {
        Self {
            result: ParsedResult::default(),
            section: Section::None,
        }
    }

    fn enter(&mut self, section: Section) {
        let previous = std::mem::replace(&mut self.section, section);
        match previous {
            Section::MoreDetails(buffer) => self.result.more_details.push_str(&buffer),
            Section::IngredientDetails(entry) => self.push_ingredient(entry),
            Section::None | Section::Bullets(_) => {}
        }
    }

    fn push_ingredient(&mut self, entry: Option<IngredientDetail>) {
        if let Some(mut entry) = entry {
            entry.explanation = entry.explanation.trim().to_string();
            self.result.ingredient_specific_details.push(entry);
        }
    }

    fn list_mut(&mut self, list: BulletList) -> &mut Vec<String> {
        match list {
            BulletList::ClaimsFailed => &mut self.result.claims_failed,
            BulletList::WhyClaimsFailed => &mut self.result.why_claims_failed,
            BulletList::IngredientsToNote => &mut self.result.ingredients_to_note,
            BulletList::ImprovementSuggestions => &mut self.result.improvement_suggestions,
        }
    }

    fn accumulate(&mut self, line: &str) {
        match &mut self.section {
            Section::None => {}
            Section::Bullets(list) => {
                let list = *list;
                if let Some(item) = line.strip_prefix(BULLET_PREFIX) {
                    self.list_mut(list).push(item.trim().to_string());
                }
            }
            Section::MoreDetails(buffer) => {
                if !line.is_empty() {
                    buffer.push_str(line);
                    buffer.push('\n');
                }
            }
            Section::IngredientDetails(current) => {
                if let Some(name) = line.strip_suffix(':') {
                    let name = name.trim();
                    let next = (!name.is_empty()).then(|| IngredientDetail {
                        name: name.to_string(),
                        explanation: String::new(),
                    });
                    let finished = std::mem::replace(current, next);
                    self.push_ingredient(finished);
                } else if let Some(entry) = current
                    && !line.is_empty()
                {
                    entry.explanation.push_str(line);
                    entry.explanation.push('\n');
                }
            }
        }
    }

    fn finish(mut self) -> ParsedResult {
        self.enter(Section::None);
        self.result.more_details = self.result.more_details.trim().to_string();
        self.result
    }
}

/// Parses the model's sectioned plain-text answer.
///
/// Returns `None` when the text is blank or is the "not a product label"
/// sentinel. Otherwise the text is scanned once, line by line; sections the
/// model omitted keep their empty defaults. `grounding_urls` is always empty
/// here and is filled in by the caller.
pub fn parse_response(raw_text: &str) -> Option<ParsedResult> {
    let trimmed = raw_text.trim();
    if trimmed.is_empty() || trimmed == IRRELEVANT_INPUT_MESSAGE {
        return None;
    }

    let mut state = ParseState::new();
    let mut lines = raw_text.lines().map(str::trim);

    while let Some(line) = lines.next() {
        if RiskIcon::leading(line).is_some() {
            if let Some(token) = line.split_whitespace().next() {
                state.result.icon = token.to_string();
            }
            continue;
        }

        let Some(header) = Header::recognize(line) else {
            state.accumulate(line);
            continue;
        };

        match header {
            Header::OverallVerdict => {
                state.enter(Section::None);
                state.result.overall_verdict = lines.next().unwrap_or_default().to_string();
            }
            Header::GreenwashingRisk => {
                state.enter(Section::None);
                state.result.greenwashing_risk = lines.next().unwrap_or_default().to_string();
            }
            Header::ClaimsFailed => state.enter(Section::Bullets(BulletList::ClaimsFailed)),
            Header::WhyClaimsFailed => state.enter(Section::Bullets(BulletList::WhyClaimsFailed)),
            Header::IngredientsToNote => {
                state.enter(Section::Bullets(BulletList::IngredientsToNote))
            }
            Header::ImprovementSuggestions => {
                state.enter(Section::Bullets(BulletList::ImprovementSuggestions))
            }
            Header::MoreDetails => state.enter(Section::MoreDetails(String::new())),
            Header::IngredientDetails => state.enter(Section::IngredientDetails(None)),
        }
    }

    let result = state.finish();
    debug!(
        sections = result.populated_sections(),
        icon = %result.icon,
        "Parsed assessment response"
    );

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = "🟠 Moderate concern
Overall Verdict:
Some claims are not supported
Greenwashing Risk:
55% (Medium)
Claims that failed to meet expectations:
- \"100% natural\"
- \"Eco-friendly formula\"
Why these claims failed:
- Contains synthetic preservatives.
- No certification is referenced.
Ingredients to note:
- Methylparaben
- Fragrance (Parfum)
More details:
The product lists several plant extracts.

However, preservatives dominate the list.
Ingredient-specific details:
Methylparaben:
A synthetic preservative.
Fragrance (Parfum):
Undisclosed blend of compounds.
May include phthalates.
Improvement suggestions:
- Use a certified natural preservative system.
- Disclose fragrance components.
";

    #[test]
    fn test_blank_input_is_irrelevant() {
        assert_eq!(parse_response(""), None);
        assert_eq!(parse_response("  \n\t \n"), None);
    }

    #[test]
    fn test_sentinel_message_is_irrelevant() {
        assert_eq!(parse_response(IRRELEVANT_INPUT_MESSAGE), None);
        let padded = format!("\n  {}  \n", IRRELEVANT_INPUT_MESSAGE);
        assert_eq!(parse_response(&padded), None);
    }

    #[test]
    fn test_sentinel_inside_longer_text_is_parsed() {
        let text = format!("{}\nOverall Verdict:\nFine", IRRELEVANT_INPUT_MESSAGE);
        let result = parse_response(&text).expect("should parse");
        assert_eq!(result.overall_verdict, "Fine");
    }

    #[test]
    fn test_overall_verdict_consumes_next_line() {
        let result = parse_response("Overall Verdict:\nLow Greenwashing Risk\n").unwrap();
        assert_eq!(result.overall_verdict, "Low Greenwashing Risk");
    }

    #[test]
    fn test_value_header_on_last_line_yields_empty_value() {
        let result = parse_response("Greenwashing Risk:").unwrap();
        assert_eq!(result.greenwashing_risk, "");

        let result = parse_response("Overall Verdict:\n").unwrap();
        assert_eq!(result.overall_verdict, "");
    }

    #[test]
    fn test_value_header_takes_next_line_verbatim() {
        let result = parse_response("Overall Verdict:\nMore details:\nsomething").unwrap();
        assert_eq!(result.overall_verdict, "More details:");
        assert_eq!(result.more_details, "");
    }

    #[test]
    fn test_claims_failed_preserves_order() {
        let text = "Claims that failed to meet expectations:\n- Claim A\n- Claim B\n";
        let result = parse_response(text).unwrap();
        assert_eq!(result.claims_failed, vec!["Claim A", "Claim B"]);
    }

    #[test]
    fn test_non_bullet_lines_do_not_close_list() {
        let text = "Ingredients to note:\n- Sulfates\nnot a bullet\n\n-missing space\n- Silicones";
        let result = parse_response(text).unwrap();
        assert_eq!(result.ingredients_to_note, vec!["Sulfates", "Silicones"]);
    }

    #[test]
    fn test_ingredient_details_entry() {
        let text = "Ingredient-specific details:\nParaben:\nSynthetic preservative.\nMore text.\n";
        let result = parse_response(text).unwrap();
        assert_eq!(
            result.ingredient_specific_details,
            vec![IngredientDetail {
                name: "Paraben".to_string(),
                explanation: "Synthetic preservative.\nMore text.".to_string(),
            }]
        );
    }

    #[test]
    fn test_ingredient_details_ignores_text_without_active_entry() {
        let text = "Ingredient-specific details:\norphan line\n :\nstill orphan\nTalc:\n\nMineral.";
        let result = parse_response(text).unwrap();
        assert_eq!(result.ingredient_specific_details.len(), 1);
        assert_eq!(result.ingredient_specific_details[0].name, "Talc");
        assert_eq!(
            result.ingredient_specific_details[0].explanation,
            "Mineral."
        );
    }

    #[test]
    fn test_ingredient_entry_without_explanation_is_kept() {
        let text = "Ingredient-specific details:\nGlycerin:\nImprovement suggestions:\n- None";
        let result = parse_response(text).unwrap();
        assert_eq!(result.ingredient_specific_details[0].name, "Glycerin");
        assert_eq!(result.ingredient_specific_details[0].explanation, "");
        assert_eq!(result.improvement_suggestions, vec!["None"]);
    }

    #[test]
    fn test_icon_and_verdict_are_independent() {
        let text = "Preamble\n✅ Looks fine\nunrelated\nOverall Verdict:\nLow Greenwashing Risk";
        let result = parse_response(text).unwrap();
        assert_eq!(result.icon, "✅");
        assert_eq!(result.overall_verdict, "Low Greenwashing Risk");
    }

    #[test]
    fn test_icon_line_does_not_change_section() {
        let text = "Claims that failed to meet expectations:\n- A\n❌\n- B";
        let result = parse_response(text).unwrap();
        assert_eq!(result.icon, "❌");
        assert_eq!(result.claims_failed, vec!["A", "B"]);
    }

    #[test]
    fn test_headers_are_case_sensitive() {
        let result = parse_response("overall verdict:\nSomething\nMORE DETAILS:\nText").unwrap();
        assert_eq!(result, ParsedResult::default());
    }

    #[test]
    fn test_full_response() {
        let result = parse_response(FULL_RESPONSE).unwrap();

        assert_eq!(result.icon, "🟠");
        assert_eq!(result.overall_verdict, "Some claims are not supported");
        assert_eq!(result.greenwashing_risk, "55% (Medium)");
        assert_eq!(
            result.claims_failed,
            vec!["\"100% natural\"", "\"Eco-friendly formula\""]
        );
        assert_eq!(result.why_claims_failed.len(), 2);
        assert_eq!(
            result.ingredients_to_note,
            vec!["Methylparaben", "Fragrance (Parfum)"]
        );
        assert_eq!(
            result.more_details,
            "The product lists several plant extracts.\nHowever, preservatives dominate the list."
        );
        assert_eq!(result.ingredient_specific_details.len(), 2);
        assert_eq!(
            result.ingredient_specific_details[1],
            IngredientDetail {
                name: "Fragrance (Parfum)".to_string(),
                explanation: "Undisclosed blend of compounds.\nMay include phthalates.".to_string(),
            }
        );
        assert_eq!(result.improvement_suggestions.len(), 2);
        assert!(result.grounding_urls.is_empty());
        assert_eq!(result.populated_sections(), 8);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse_response(FULL_RESPONSE);
        let second = parse_response(FULL_RESPONSE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_sections_keep_defaults() {
        let result = parse_response("Some chatter the model added\nwithout any headers").unwrap();
        assert_eq!(result, ParsedResult::default());
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "Greenwashing Risk:\r\n80% (High)\r\n\
                    Claims that failed to meet expectations:\r\n- Vegan\r\n";
        let result = parse_response(text).unwrap();
        assert_eq!(result.greenwashing_risk, "80% (High)");
        assert_eq!(result.claims_failed, vec!["Vegan"]);
    }
}
