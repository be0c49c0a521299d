use lopdf::{
    Dictionary, Document as PdfDocument, Object, ObjectId, Stream,
    content::{Content, Operation},
    dictionary,
};

use crate::domain::{
    assessment::entities::RiskIcon,
    common::entities::app_errors::CoreError,
    report::{
        entities::{
            Document, Font, LinkArea, Page, PageGeometry, REPORT_CONTENT_TYPE, TextRun, Tone,
        },
        ports::DocumentWriter,
    },
};

const PRODUCER: &str = "greenlens";
const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Writes reports as uncompressed PDF 1.5 using the standard Helvetica faces.
#[derive(Debug, Clone, Default)]
pub struct LopdfDocumentWriter;

impl LopdfDocumentWriter {
    pub fn new() -> Self {
        Self
    }

    fn font(name: &str) -> Dictionary {
        dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => name,
            "Encoding" => "WinAnsiEncoding",
        }
    }

    fn content(page: &Page, geometry: &PageGeometry) -> Content {
        let operations = page
            .text_runs()
            .flat_map(|run| text_operations(run, geometry))
            .collect();

        Content { operations }
    }

    fn link(link: &LinkArea, geometry: &PageGeometry) -> Dictionary {
        let bottom = geometry.height - link.y - link.height;
        dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![
                link.x.into(),
                bottom.into(),
                (link.x + link.width).into(),
                (bottom + link.height).into(),
            ],
            "Border" => vec![0.into(), 0.into(), 0.into()],
            "A" => dictionary! {
                "Type" => "Action",
                "S" => "URI",
                "URI" => Object::string_literal(link.uri.as_bytes().to_vec()),
            },
        }
    }

    fn add_page(
        pdf: &mut PdfDocument,
        pages_id: ObjectId,
        page: &Page,
        geometry: &PageGeometry,
    ) -> Result<ObjectId, CoreError> {
        let encoded = Self::content(page, geometry).encode().map_err(|e| {
            tracing::error!("Failed to encode page content: {}", e);
            CoreError::RenderError(e.to_string())
        })?;
        let content_id = pdf.add_object(Stream::new(Dictionary::new(), encoded));

        let mut annotations: Vec<Object> = Vec::new();
        for link in page.links() {
            annotations.push(pdf.add_object(Self::link(link, geometry)).into());
        }

        let mut page_dictionary = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if !annotations.is_empty() {
            page_dictionary.set("Annots", annotations);
        }

        Ok(pdf.add_object(page_dictionary))
    }
}

impl DocumentWriter for LopdfDocumentWriter {
    fn content_type(&self) -> &'static str {
        REPORT_CONTENT_TYPE
    }

    fn write(&self, document: &Document) -> Result<Vec<u8>, CoreError> {
        let geometry = &document.geometry;
        let mut pdf = PdfDocument::with_version("1.5");
        let pages_id = pdf.new_object_id();

        let regular_id = pdf.add_object(Self::font("Helvetica"));
        let bold_id = pdf.add_object(Self::font("Helvetica-Bold"));
        let resources_id = pdf.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR_FONT => regular_id,
                BOLD_FONT => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
        for page in &document.pages {
            kids.push(Self::add_page(&mut pdf, pages_id, page, geometry)?.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => document.pages.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
        };
        pdf.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = pdf.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = pdf.add_object(dictionary! {
            "Title" => Object::string_literal(encode_win_ansi(&document.title)),
            "Producer" => Object::string_literal(PRODUCER),
        });
        pdf.trailer.set("Root", catalog_id);
        pdf.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        pdf.save_to(&mut bytes).map_err(|e| {
            tracing::error!("Failed to serialize PDF: {}", e);
            CoreError::RenderError(e.to_string())
        })?;

        tracing::debug!(
            pages = document.pages.len(),
            bytes = bytes.len(),
            "PDF written"
        );
        Ok(bytes)
    }
}

fn text_operations(run: &TextRun, geometry: &PageGeometry) -> Vec<Operation> {
    let font = match run.font {
        Font::Regular => REGULAR_FONT,
        Font::Bold => BOLD_FONT,
    };
    let (r, g, b): (f32, f32, f32) = match run.tone {
        Tone::Body => (0.1, 0.1, 0.1),
        Tone::Muted => (0.45, 0.45, 0.45),
        Tone::Link => (0.05, 0.35, 0.7),
    };

    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.into(), run.size.into()]),
        Operation::new("rg", vec![r.into(), g.into(), b.into()]),
        Operation::new("Td", vec![run.x.into(), (geometry.height - run.y).into()]),
        Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(&run.text))],
        ),
        Operation::new("ET", vec![]),
    ]
}

/// Encodes text for the standard fonts' WinAnsiEncoding.
///
/// Risk glyphs become their textual labels and anything else outside the
/// code page is printed as `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut text = text.to_string();
    for icon in RiskIcon::ALL {
        text = text.replace(icon.glyph(), icon.label());
    }

    text.chars().filter_map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    let byte = match ch {
        // variation selector and joiner trail emoji
        '\u{FE0F}' | '\u{200D}' => return None,
        '\t' => b' ',
        ' '..='~' => ch as u8,
        '\u{A0}'..='\u{FF}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    };
    Some(byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        assessment::entities::{GroundingUrl, ParsedResult},
        report::paginator::ReportPaginator,
    };

    fn render(result: &ParsedResult) -> Vec<u8> {
        let document = ReportPaginator::default().render(result);
        LopdfDocumentWriter::new().write(&document).unwrap()
    }

    #[test]
    fn test_win_ansi_replaces_icons_and_unknown_characters() {
        assert_eq!(encode_win_ansi("❌ Report"), b"[HIGH RISK] Report".to_vec());
        assert_eq!(encode_win_ansi("✅"), b"[LOW RISK]".to_vec());
        assert_eq!(encode_win_ansi("🟠"), b"[MEDIUM RISK]".to_vec());
        assert_eq!(encode_win_ansi("✅\u{FE0F}"), b"[LOW RISK]".to_vec());
        assert_eq!(
            encode_win_ansi("café • 5€"),
            vec![b'c', b'a', b'f', 0xE9, b' ', 0x95, b' ', b'5', 0x80]
        );
        assert_eq!(encode_win_ansi("水"), b"?".to_vec());
    }

    #[test]
    fn test_written_pdf_loads_with_expected_pages() {
        let result = ParsedResult {
            icon: "🟠".to_string(),
            more_details: "Lorem ipsum dolor sit amet. ".repeat(600),
            ..ParsedResult::default()
        };
        let document = ReportPaginator::default().render(&result);
        let bytes = LopdfDocumentWriter::new().write(&document).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        let loaded = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), document.pages.len());
        assert!(document.pages.len() > 1);
    }

    #[test]
    fn test_text_is_drawn_with_standard_fonts() {
        let bytes = render(&ParsedResult::default());
        let output = String::from_utf8_lossy(&bytes);

        assert!(output.contains("/Helvetica-Bold"));
        assert!(output.contains("/WinAnsiEncoding"));
        assert!(output.contains("(Greenwashing Analysis Report) Tj"));
        assert!(output.contains("(None) Tj"));
    }

    #[test]
    fn test_sources_become_link_annotations() {
        let result = ParsedResult {
            grounding_urls: vec![GroundingUrl {
                uri: "https://example.org/source".to_string(),
                title: "Example".to_string(),
            }],
            ..ParsedResult::default()
        };
        let bytes = render(&result);
        let output = String::from_utf8_lossy(&bytes);

        assert!(output.contains("/Link"));
        assert!(output.contains("/URI"));
        assert!(output.contains("(https://example.org/source)"));
    }

    #[test]
    fn test_content_type_is_pdf() {
        assert_eq!(LopdfDocumentWriter::new().content_type(), "application/pdf");
    }
}
