use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Structured view of one LLM assessment answer.
///
/// Every field has a well-defined empty value; a section the model left out
/// is represented by that empty value rather than by an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ParsedResult {
    /// Risk glyph chosen by the model (`❌`, `🟠`, `✅`), empty when absent.
    pub icon: String,
    pub overall_verdict: String,
    pub greenwashing_risk: String,
    pub claims_failed: Vec<String>,
    pub why_claims_failed: Vec<String>,
    pub ingredients_to_note: Vec<String>,
    pub more_details: String,
    pub ingredient_specific_details: Vec<IngredientDetail>,
    pub improvement_suggestions: Vec<String>,
    /// Citations from the web-search grounding, attached after parsing.
    pub grounding_urls: Vec<GroundingUrl>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientDetail {
    pub name: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GroundingUrl {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskIcon {
    High,
    Medium,
    Low,
}

impl RiskIcon {
    pub const ALL: [RiskIcon; 3] = [RiskIcon::High, RiskIcon::Medium, RiskIcon::Low];

    pub fn glyph(&self) -> &'static str {
        match self {
            RiskIcon::High => "❌",
            RiskIcon::Medium => "🟠",
            RiskIcon::Low => "✅",
        }
    }

    /// Plain-text stand-in for renderers without emoji support.
    pub fn label(&self) -> &'static str {
        match self {
            RiskIcon::High => "[HIGH RISK]",
            RiskIcon::Medium => "[MEDIUM RISK]",
            RiskIcon::Low => "[LOW RISK]",
        }
    }

    /// Returns the icon a line starts with, if any.
    pub fn leading(line: &str) -> Option<RiskIcon> {
        Self::ALL
            .into_iter()
            .find(|icon| line.starts_with(icon.glyph()))
    }
}

impl ParsedResult {
    /// Number of populated sections, used for diagnostics.
    pub fn populated_sections(&self) -> usize {
        [
            !self.overall_verdict.is_empty(),
            !self.greenwashing_risk.is_empty(),
            !self.claims_failed.is_empty(),
            !self.why_claims_failed.is_empty(),
            !self.ingredients_to_note.is_empty(),
            !self.more_details.is_empty(),
            !self.ingredient_specific_details.is_empty(),
            !self.improvement_suggestions.is_empty(),
        ]
        .into_iter()
        .filter(|populated| *populated)
        .count()
    }
}
