use std::fmt::Write as _;
use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;

use crate::models::itinerary::ItineraryPlan;

pub const PDF_FILE_NAME: &str = "travel_itinerary.pdf";
const PDF_TITLE: &str = "Travel Itinerary";
const FONT_SIZE_PT: f32 = 12.0;
const MM_PER_PT: f32 = 25.4 / 72.0;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF font error: {0}")]
    Font(String),

    #[error("PDF save error: {0}")]
    Save(String),
}

/// Flat text form of a plan. Days without entries are skipped.
pub fn render_text(plan: &ItineraryPlan) -> String {
    let mut text = String::new();
    for day in plan.scheduled_days() {
        let _ = writeln!(text, "Day {}", day.day);
        for entry in &day.entries {
            let _ = writeln!(
                text,
                "- Destination: {} ({})",
                entry.review.destination, entry.review.district
            );
            let _ = writeln!(text, "  Sentiment: {}", entry.review.sentiment);
            let _ = writeln!(text, "  Activity: {}", entry.activity_label());
        }
        text.push('\n');
    }
    text
}

/// A line positioned on a page, coordinates in points from the bottom-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

/// Fixed line-height layout. Lines are never wrapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub left_margin: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
    pub line_height: f32,
}

impl PageLayout {
    /// US letter, 50pt margins, 15pt line height.
    pub const LETTER: PageLayout = PageLayout {
        page_width: 612.0,
        page_height: 792.0,
        left_margin: 50.0,
        top_margin: 50.0,
        bottom_margin: 50.0,
        line_height: 15.0,
    };

    fn top(&self) -> f32 {
        self.page_height - self.top_margin
    }

    pub fn paginate(&self, text: &str) -> Vec<Vec<PlacedLine>> {
        let mut pages = vec![Vec::new()];
        let mut y = self.top();

        for line in text.split('\n') {
            // A page break only opens a new page once there is something to draw on it.
            if y < self.bottom_margin {
                pages.push(Vec::new());
                y = self.top();
            }
            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    text: line.to_string(),
                    x: self.left_margin,
                    y,
                });
            }
            y -= self.line_height;
        }

        pages
    }
}

fn pt(value: f32) -> Mm {
    Mm(value * MM_PER_PT)
}

/// Renders the plan's text onto letter pages and returns the PDF bytes.
pub fn render_pdf(plan: &ItineraryPlan) -> Result<Vec<u8>, ReportError> {
    render_text_pdf(&render_text(plan), &PageLayout::LETTER)
}

pub fn render_text_pdf(text: &str, layout: &PageLayout) -> Result<Vec<u8>, ReportError> {
    let width = pt(layout.page_width);
    let height = pt(layout.page_height);
    let (doc, first_page, first_layer) = PdfDocument::new(PDF_TITLE, width, height, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Font(e.to_string()))?;

    for (idx, lines) in layout.paginate(text).into_iter().enumerate() {
        let (page, layer) = if idx == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);
        for line in lines.iter().filter(|l| !l.text.is_empty()) {
            layer.use_text(line.text.as_str(), FONT_SIZE_PT, pt(line.x), pt(line.y), &font);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Save(e.to_string()))?;
    buf.into_inner()
        .map_err(|e| ReportError::Save(e.to_string()))
}
