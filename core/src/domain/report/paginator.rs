use crate::domain::{
    assessment::{
        entities::{GroundingUrl, IngredientDetail, ParsedResult},
        parser::{
            CLAIMS_FAILED_HEADER, GREENWASHING_RISK_HEADER, IMPROVEMENT_SUGGESTIONS_HEADER,
            INGREDIENT_DETAILS_HEADER, INGREDIENTS_TO_NOTE_HEADER, MORE_DETAILS_HEADER,
            OVERALL_VERDICT_HEADER, WHY_CLAIMS_FAILED_HEADER,
        },
    },
    report::{
        entities::{
            Document, Font, LinkArea, Page, PageGeometry, Placement, REPORT_TITLE, TextRun, Tone,
        },
        metrics::{text_width, wrap_text},
    },
};

/// Printed under a list heading when the list is empty.
pub const NONE_FALLBACK: &str = "None";
/// Printed under "Why these claims failed:" when no rationale was given.
pub const CLAIMS_REASONABLE_FALLBACK: &str =
    "All claims appear reasonable or are well-supported by ingredients.";
pub const SOURCE_INFORMATION_HEADING: &str = "Source Information";

const BULLET: &str = "•";

/// Lays a [`ParsedResult`] out on fixed-size pages.
///
/// Placement is greedy: before each line the vertical cursor is checked
/// against the bottom margin and a new page is started when the line does
/// not fit. Two groups are kept together: an ingredient name with the first
/// line of its explanation, and a source title with the first line of its URI.
#[derive(Debug, Clone, Default)]
pub struct ReportPaginator {
    geometry: PageGeometry,
}

impl ReportPaginator {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    pub fn render(&self, result: &ParsedResult) -> Document {
        let mut layout = Layout::new(self.geometry);

        layout.title(&result.icon);
        layout.labelled_value(OVERALL_VERDICT_HEADER, &result.overall_verdict);
        layout.labelled_value(GREENWASHING_RISK_HEADER, &result.greenwashing_risk);
        layout.list_section(
            CLAIMS_FAILED_HEADER,
            &result.claims_failed,
            Some(NONE_FALLBACK),
        );
        layout.list_section(
            WHY_CLAIMS_FAILED_HEADER,
            &result.why_claims_failed,
            Some(CLAIMS_REASONABLE_FALLBACK),
        );
        layout.list_section(
            INGREDIENTS_TO_NOTE_HEADER,
            &result.ingredients_to_note,
            Some(NONE_FALLBACK),
        );

        if !result.more_details.is_empty() {
            layout.heading(MORE_DETAILS_HEADER);
            layout.paragraph(0.0, &result.more_details, Font::Regular, Tone::Body);
            layout.gap();
        }

        if !result.ingredient_specific_details.is_empty() {
            layout.heading(INGREDIENT_DETAILS_HEADER);
            for detail in &result.ingredient_specific_details {
                layout.ingredient(detail);
            }
            layout.gap();
        }

        if !result.improvement_suggestions.is_empty() {
            layout.list_section(
                IMPROVEMENT_SUGGESTIONS_HEADER,
                &result.improvement_suggestions,
                None,
            );
        }

        if !result.grounding_urls.is_empty() {
            layout.heading(SOURCE_INFORMATION_HEADING);
            for (index, source) in result.grounding_urls.iter().enumerate() {
                layout.source(index + 1, source);
            }
        }

        layout.finish()
    }
}

struct Layout {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: Page,
    cursor: f32,
}

impl Layout {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            cursor: geometry.margin,
        }
    }

    /// Vertical space one line of text at `size` takes.
    fn advance(&self, size: f32) -> f32 {
        self.geometry.line_height.max(size * 1.35)
    }

    fn ensure_space(&mut self, required: f32) {
        if self.cursor + required > self.geometry.bottom_limit() {
            self.pages.push(std::mem::take(&mut self.current));
            self.cursor = self.geometry.margin;
        }
    }

    /// Places one line and returns the top edge it was placed at.
    fn line(&mut self, indent: f32, text: String, font: Font, size: f32, tone: Tone) -> f32 {
        let advance = self.advance(size);
        self.ensure_space(advance);

        let top = self.cursor;
        self.current.placements.push(Placement::Text(TextRun {
            x: self.geometry.margin + indent,
            y: top + size,
            text,
            font,
            size,
            tone,
        }));
        self.cursor += advance;
        top
    }

    fn wrap(&self, indent: f32, text: &str, font: Font, size: f32) -> Vec<String> {
        wrap_text(text, font, size, self.geometry.content_width() - indent)
    }

    fn paragraph(&mut self, indent: f32, text: &str, font: Font, tone: Tone) {
        let size = self.geometry.body_size;
        for line in self.wrap(indent, text, font, size) {
            self.line(indent, line, font, size, tone);
        }
    }

    fn gap(&mut self) {
        self.cursor += self.geometry.line_height * 0.5;
    }

    fn title(&mut self, icon: &str) {
        let text = if icon.is_empty() {
            REPORT_TITLE.to_string()
        } else {
            format!("{} {}", icon, REPORT_TITLE)
        };
        let size = self.geometry.title_size;
        self.line(0.0, text, Font::Bold, size, Tone::Body);
        self.gap();
    }

    fn heading(&mut self, label: &str) {
        let size = self.geometry.heading_size;
        self.line(0.0, label.to_string(), Font::Bold, size, Tone::Body);
    }

    fn labelled_value(&mut self, label: &str, value: &str) {
        self.heading(label);
        self.paragraph(self.geometry.indent, value, Font::Regular, Tone::Body);
        self.gap();
    }

    fn list_section(&mut self, label: &str, items: &[String], fallback: Option<&str>) {
        self.heading(label);

        if items.is_empty() {
            if let Some(fallback) = fallback {
                self.paragraph(self.geometry.indent, fallback, Font::Regular, Tone::Muted);
            }
        } else {
            for item in items {
                self.bullet(item);
            }
        }

        self.gap();
    }

    fn bullet(&mut self, item: &str) {
        let indent = self.geometry.indent;
        let size = self.geometry.body_size;
        let lines = self.wrap(indent * 2.0, item, Font::Regular, size);

        for (index, line) in lines.into_iter().enumerate() {
            if index == 0 {
                self.line(
                    indent,
                    format!("{} {}", BULLET, line),
                    Font::Regular,
                    size,
                    Tone::Body,
                );
            } else {
                self.line(indent * 2.0, line, Font::Regular, size, Tone::Body);
            }
        }
    }

    fn ingredient(&mut self, detail: &IngredientDetail) {
        let indent = self.geometry.indent;
        let size = self.geometry.body_size;
        let name_lines = self.wrap(0.0, &detail.name, Font::Bold, size);
        let explanation_lines = self.wrap(indent, &detail.explanation, Font::Regular, size);

        // Name never ends a page on its own
        let grouped = name_lines.len() + usize::from(!explanation_lines.is_empty());
        self.ensure_space(grouped as f32 * self.advance(size));

        for line in name_lines {
            self.line(0.0, line, Font::Bold, size, Tone::Body);
        }
        for line in explanation_lines {
            self.line(indent, line, Font::Regular, size, Tone::Body);
        }
    }

    fn source(&mut self, number: usize, source: &GroundingUrl) {
        let indent = self.geometry.indent;
        let size = self.geometry.body_size;
        let title = if source.title.is_empty() {
            &source.uri
        } else {
            &source.title
        };
        let title_lines = self.wrap(0.0, &format!("{}. {}", number, title), Font::Regular, size);
        let uri_lines = self.wrap(indent, &source.uri, Font::Regular, size);

        let grouped = title_lines.len() + usize::from(!uri_lines.is_empty());
        self.ensure_space(grouped as f32 * self.advance(size));

        for line in title_lines {
            self.line(0.0, line, Font::Regular, size, Tone::Body);
        }
        let height = self.advance(size);
        for line in uri_lines {
            let width = text_width(&line, Font::Regular, size);
            let top = self.line(indent, line, Font::Regular, size, Tone::Link);
            self.current.placements.push(Placement::Link(LinkArea {
                x: self.geometry.margin + indent,
                y: top,
                width,
                height,
                uri: source.uri.clone(),
            }));
        }
    }

    fn finish(mut self) -> Document {
        if !self.current.placements.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }

        Document {
            title: REPORT_TITLE.to_string(),
            geometry: self.geometry,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> ParsedResult {
        ParsedResult {
            icon: "❌".to_string(),
            overall_verdict: "Misleading".to_string(),
            greenwashing_risk: "85% (Critical)".to_string(),
            claims_failed: vec!["Plastic-free".to_string()],
            why_claims_failed: vec!["Contains polyethylene.".to_string()],
            ingredients_to_note: vec!["Polyethylene".to_string()],
            more_details: "Microplastics persist in water.".to_string(),
            ingredient_specific_details: vec![IngredientDetail {
                name: "Polyethylene".to_string(),
                explanation: "A plastic polymer.".to_string(),
            }],
            improvement_suggestions: vec!["Replace microbeads.".to_string()],
            grounding_urls: vec![GroundingUrl {
                uri: "https://example.org/microplastics".to_string(),
                title: "Microplastics overview".to_string(),
            }],
        }
    }

    fn texts(document: &Document) -> Vec<String> {
        document.text_runs().map(|run| run.text.clone()).collect()
    }

    fn position(texts: &[String], needle: &str) -> usize {
        texts
            .iter()
            .position(|text| text == needle)
            .unwrap_or_else(|| panic!("missing line {needle:?}"))
    }

    #[test]
    fn test_sections_follow_fixed_order() {
        let document = ReportPaginator::default().render(&sample_result());
        let texts = texts(&document);

        let order = [
            "❌ Greenwashing Analysis Report",
            OVERALL_VERDICT_HEADER,
            "Misleading",
            GREENWASHING_RISK_HEADER,
            "85% (Critical)",
            CLAIMS_FAILED_HEADER,
            "• Plastic-free",
            WHY_CLAIMS_FAILED_HEADER,
            "• Contains polyethylene.",
            INGREDIENTS_TO_NOTE_HEADER,
            "• Polyethylene",
            MORE_DETAILS_HEADER,
            "Microplastics persist in water.",
            INGREDIENT_DETAILS_HEADER,
            "Polyethylene",
            "A plastic polymer.",
            IMPROVEMENT_SUGGESTIONS_HEADER,
            "• Replace microbeads.",
            SOURCE_INFORMATION_HEADING,
            "1. Microplastics overview",
            "https://example.org/microplastics",
        ];
        assert_eq!(texts, order);
        assert_eq!(document.pages.len(), 1);
    }

    #[test]
    fn test_empty_lists_render_fallbacks() {
        let document = ReportPaginator::default().render(&ParsedResult::default());
        let texts = texts(&document);

        let claims = position(&texts, CLAIMS_FAILED_HEADER);
        assert_eq!(texts[claims + 1], NONE_FALLBACK);
        let why = position(&texts, WHY_CLAIMS_FAILED_HEADER);
        assert_eq!(texts[why + 1], CLAIMS_REASONABLE_FALLBACK);
        let ingredients = position(&texts, INGREDIENTS_TO_NOTE_HEADER);
        assert_eq!(texts[ingredients + 1], NONE_FALLBACK);

        assert!(!texts.iter().any(|text| text.starts_with(BULLET)));
        let absent = |heading: &str| !texts.iter().any(|text| text == heading);
        assert!(absent(MORE_DETAILS_HEADER));
        assert!(absent(IMPROVEMENT_SUGGESTIONS_HEADER));
        assert!(absent(SOURCE_INFORMATION_HEADING));
        assert_eq!(texts[0], REPORT_TITLE);
    }

    #[test]
    fn test_long_more_details_continue_on_next_page() {
        let words: Vec<String> = (0..1500).map(|i| format!("word{i}")).collect();
        let paragraph = words.join(" ");
        let result = ParsedResult {
            more_details: paragraph.clone(),
            ..ParsedResult::default()
        };

        let document = ReportPaginator::default().render(&result);
        assert!(document.pages.len() > 1);

        let texts = texts(&document);
        let start = position(&texts, MORE_DETAILS_HEADER) + 1;
        assert_eq!(texts[start..].join(" "), paragraph);
    }

    #[test]
    fn test_lines_stay_inside_margins() {
        let mut result = sample_result();
        result.more_details = "Lorem ipsum dolor sit amet. ".repeat(400);
        let geometry = PageGeometry::A4;

        let document = ReportPaginator::new(geometry).render(&result);
        for page in &document.pages {
            for run in page.text_runs() {
                assert!(run.y >= geometry.margin);
                assert!(run.y <= geometry.bottom_limit());
                assert!(
                    run.x + text_width(&run.text, run.font, run.size) <= geometry.width
                );
            }
        }
    }

    #[test]
    fn test_ingredient_name_never_ends_a_page() {
        let geometry = PageGeometry {
            height: 220.0,
            margin: 20.0,
            ..PageGeometry::A4
        };
        let details: Vec<IngredientDetail> = (0..40)
            .map(|i| IngredientDetail {
                name: format!("Ingredient {i}"),
                explanation: format!("First line {i}.\nSecond line {i}."),
            })
            .collect();
        let result = ParsedResult {
            ingredient_specific_details: details,
            ..ParsedResult::default()
        };

        let document = ReportPaginator::new(geometry).render(&result);
        assert!(document.pages.len() > 3);

        for page in &document.pages {
            let last = page.text_runs().last().expect("page should not be empty");
            assert!(
                !last.text.starts_with("Ingredient "),
                "orphaned name {:?}",
                last.text
            );
        }

        let texts = texts(&document);
        let name = position(&texts, "Ingredient 17");
        assert_eq!(texts[name + 1], "First line 17.");
        assert_eq!(texts[name + 2], "Second line 17.");
    }

    #[test]
    fn test_sources_become_links() {
        let mut result = sample_result();
        result.grounding_urls.push(GroundingUrl {
            uri: "https://example.com/untitled".to_string(),
            title: String::new(),
        });

        let document = ReportPaginator::default().render(&result);
        let links: Vec<&LinkArea> = document.pages.iter().flat_map(Page::links).collect();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].uri, "https://example.org/microplastics");
        assert!(links[0].width > 0.0);
        let untitled = "2. https://example.com/untitled".to_string();
        assert!(texts(&document).contains(&untitled));

        let link_run = document
            .text_runs()
            .find(|run| run.tone == Tone::Link)
            .unwrap();
        assert_eq!(link_run.text, "https://example.org/microplastics");
    }

    #[test]
    fn test_render_is_deterministic() {
        let paginator = ReportPaginator::default();
        assert_eq!(
            paginator.render(&sample_result()),
            paginator.render(&sample_result())
        );
    }
}
