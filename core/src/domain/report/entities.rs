pub const REPORT_FILE_NAME: &str = "greenwashing-analysis-report.pdf";
pub const REPORT_CONTENT_TYPE: &str = "application/pdf";
pub const REPORT_TITLE: &str = "Greenwashing Analysis Report";

/// Fixed page layout in PDF points, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub line_height: f32,
    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub indent: f32,
}

impl PageGeometry {
    /// ISO A4 portrait.
    pub const A4: PageGeometry = PageGeometry {
        width: 595.28,
        height: 841.89,
        margin: 48.0,
        line_height: 15.0,
        title_size: 18.0,
        heading_size: 12.0,
        body_size: 10.5,
        indent: 14.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y a line may reach before a page break is required.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Body,
    Muted,
    Link,
}

/// A single line of text. `y` is the baseline measured from the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: Font,
    pub size: f32,
    pub tone: Tone,
}

/// Clickable area; `y` is the top edge measured from the top of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Text(TextRun),
    Link(LinkArea),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub placements: Vec<Placement>,
}

impl Page {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.placements.iter().filter_map(|placement| match placement {
            Placement::Text(run) => Some(run),
            Placement::Link(_) => None,
        })
    }

    pub fn links(&self) -> impl Iterator<Item = &LinkArea> {
        self.placements.iter().filter_map(|placement| match placement {
            Placement::Link(link) => Some(link),
            Placement::Text(_) => None,
        })
    }
}

/// Laid-out report, independent of the output encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(Page::text_runs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}
