//! CSV exporter.

use invex_products::Selection;

use crate::{ExportError, ExportFormat, Exporter, Result};

/// Writes one record per product under an `id,name,price,quantity` header.
///
/// Quoting follows RFC 4180 (handled by the `csv` crate), so names containing
/// commas, quotes or newlines survive a round trip.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter;

impl CsvExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn render(&self, selection: &Selection) -> Result<Vec<u8>> {
        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(Vec::new());

        // Header comes from the Product field names on the first serialize.
        for product in selection.iter() {
            writer.serialize(product)?;
        }

        writer
            .into_inner()
            .map_err(|e| ExportError::Io(e.into_error()))
    }
}
