//! Document exporters for catalog selections.
//!
//! Every format implements [`Exporter`]; the HTTP layer picks one with
//! [`exporter_for`] and never needs to know which backend crate is behind it.
//! - CSV (`csv`)
//! - PDF (`printpdf`)
//! - XLSX (`rust_xlsxwriter`)

mod csv;
mod pdf;
mod xlsx;

pub use self::csv::CsvExporter;
pub use self::pdf::PdfExporter;
pub use self::xlsx::XlsxExporter;

use invex_products::Selection;
use thiserror::Error;

/// Column labels shared by the PDF table and the spreadsheet header row.
pub const COLUMN_HEADERS: [&str; 4] = ["ID", "Name", "Price", "Quantity"];

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Anything that went wrong while rendering a document.
///
/// The partially written buffer is dropped with the error.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("pdf rendering failed: {0}")]
    Pdf(String),

    #[error("xlsx rendering failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Pdf,
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Pdf, Self::Csv, Self::Xlsx];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Csv => "text/csv",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// Suggested download name, always `data.<ext>`.
    pub fn filename(&self) -> &'static str {
        match self {
            Self::Pdf => "data.pdf",
            Self::Csv => "data.csv",
            Self::Xlsx => "data.xlsx",
        }
    }

    /// Upper-case label used in user-facing messages ("Failed to generate PDF").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Csv => "CSV",
            Self::Xlsx => "XLSX",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// A finished document plus the metadata needed to serve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: &'static str,
}

impl Document {
    /// Value for the `Content-Disposition` response header.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.filename)
    }
}

/// Renders a selection into one document format.
pub trait Exporter: Send + Sync {
    fn format(&self) -> ExportFormat;

    /// Produce the raw document bytes.
    fn render(&self, selection: &Selection) -> Result<Vec<u8>>;

    /// Render and attach the format's content type and filename.
    fn export(&self, selection: &Selection) -> Result<Document> {
        let format = self.format();
        let bytes = self.render(selection)?;
        tracing::debug!(%format, rows = selection.len(), bytes = bytes.len(), "document rendered");
        Ok(Document {
            bytes,
            content_type: format.mime_type(),
            filename: format.filename(),
        })
    }
}

/// Get the exporter for a format.
pub fn exporter_for(format: ExportFormat) -> Box<dyn Exporter> {
    match format {
        ExportFormat::Pdf => Box::new(PdfExporter::new()),
        ExportFormat::Csv => Box::new(CsvExporter::new()),
        ExportFormat::Xlsx => Box::new(XlsxExporter::new()),
    }
}
