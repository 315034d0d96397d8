//! PDF exporter.
//!
//! Layout is expressed in points measured from the top-left corner of a US
//! Letter page and converted to PDF user space (bottom-left origin, millimetres
//! for `printpdf`) only when drawing.

use invex_products::{Product, Selection};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Pt,
};

use crate::{COLUMN_HEADERS, ExportError, ExportFormat, Exporter, Result};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const BOTTOM_MARGIN: f32 = 72.0;

const TITLE: &str = "Product Inventory";
const TITLE_SIZE: f32 = 18.0;
const TITLE_TOP: f32 = 72.0;

const BODY_SIZE: f32 = 12.0;
const TABLE_TOP: f32 = 100.0;
const FIRST_ROW_OFFSET: f32 = 30.0;
const ROW_HEIGHT: f32 = 20.0;
const RULE_OFFSET: f32 = 15.0;
const RULE_START: f32 = 50.0;
const RULE_END: f32 = 580.0;
const COLUMN_X: [f32; 4] = [50.0, 150.0, 370.0, 470.0];

/// Rough Helvetica advance width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Renders a titled four-column table, one rule under every row.
///
/// Rows that would cross the bottom margin continue on a new page with the
/// header repeated.
#[derive(Debug, Clone, Default)]
pub struct PdfExporter;

impl PdfExporter {
    pub fn new() -> Self {
        Self
    }
}

fn pdf_err(e: impl std::fmt::Debug) -> ExportError {
    ExportError::Pdf(format!("{e:?}"))
}

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

/// Distance from the top edge to distance from the bottom edge.
fn flip(y_from_top: f32) -> f32 {
    PAGE_HEIGHT - y_from_top
}

fn at(x: f32, y_from_top: f32) -> Point {
    Point::new(mm(x), mm(flip(y_from_top)))
}

struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    pages: usize,
}

impl PageWriter {
    fn start() -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(TITLE, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Page 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            font,
            pages: 1,
        })
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let name = format!("Page {}", self.pages);
        let (page, layer) = self.doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), name);
        self.layer = self.doc.get_page(page).get_layer(layer);
    }

    /// `top` is where the glyph tops sit; the baseline is placed below it.
    fn text(&self, text: &str, size: f32, x: f32, top: f32) {
        let baseline = flip(top + size * 0.8);
        self.layer.use_text(text, size, mm(x), mm(baseline), &self.font);
    }

    fn rule(&self, y: f32) {
        self.layer.add_line(Line {
            points: vec![(at(RULE_START, y), false), (at(RULE_END, y), false)],
            is_closed: false,
        });
    }

    fn title(&self) {
        let width = TITLE.chars().count() as f32 * TITLE_SIZE * AVG_GLYPH_WIDTH;
        let x = ((PAGE_WIDTH - width) / 2.0).max(0.0);
        self.text(TITLE, TITLE_SIZE, x, TITLE_TOP);
    }

    fn row(&self, cells: [&str; 4], y: f32) {
        for (cell, x) in cells.into_iter().zip(COLUMN_X) {
            self.text(cell, BODY_SIZE, x, y);
        }
        self.rule(y + RULE_OFFSET);
    }

    fn header(&self) {
        self.row(COLUMN_HEADERS, TABLE_TOP);
    }

    fn product(&self, product: &Product, y: f32) {
        let id = product.id.to_string();
        let price = product.display_price();
        let quantity = product.quantity.to_string();
        self.row(
            [id.as_str(), product.name.as_str(), price.as_str(), quantity.as_str()],
            y,
        );
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc.save_to_bytes().map_err(pdf_err)
    }
}

impl Exporter for PdfExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&self, selection: &Selection) -> Result<Vec<u8>> {
        let mut writer = PageWriter::start()?;
        writer.title();
        writer.header();

        let mut y = TABLE_TOP + FIRST_ROW_OFFSET;
        for product in selection.iter() {
            if y + RULE_OFFSET > PAGE_HEIGHT - BOTTOM_MARGIN {
                writer.new_page();
                writer.header();
                y = TABLE_TOP + FIRST_ROW_OFFSET;
            }
            writer.product(product, y);
            y += ROW_HEIGHT;
        }

        tracing::trace!(pages = writer.pages, "pdf layout complete");
        writer.finish()
    }
}
