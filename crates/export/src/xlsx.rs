//! XLSX exporter.

use invex_core::ProductId;
use invex_products::Selection;
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::{COLUMN_HEADERS, ExportFormat, Exporter, Result};

pub const SHEET_NAME: &str = "Product Inventory";

/// Column widths in characters, in header order.
const COLUMN_WIDTHS: [f64; 4] = [10.0, 32.0, 12.0, 10.0];

/// Largest magnitude an Excel number cell (an `f64`) holds without rounding.
const MAX_EXACT_INT: i128 = 1 << 53;

/// Single-sheet workbook: bold header row, then one row per product.
#[derive(Debug, Clone, Default)]
pub struct XlsxExporter;

impl XlsxExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for XlsxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    fn render(&self, selection: &Selection) -> Result<Vec<u8>> {
        let header = Format::new().set_bold();
        let price = Format::new().set_num_format("0.00");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for ((col, label), width) in (0u16..).zip(COLUMN_HEADERS).zip(COLUMN_WIDTHS) {
            sheet.write_string_with_format(0, col, label, &header)?;
            sheet.set_column_width(col, width)?;
        }

        for (row, product) in (1u32..).zip(selection.iter()) {
            match &product.id {
                ProductId::Int(id) => write_integer(sheet, row, 0, i128::from(*id))?,
                ProductId::Text(id) => {
                    sheet.write_string(row, 0, id)?;
                }
            }
            sheet.write_string(row, 1, &product.name)?;
            sheet.write_number_with_format(row, 2, product.price, &price)?;
            write_integer(sheet, row, 3, i128::from(product.quantity))?;
        }

        Ok(workbook.save_to_buffer()?)
    }
}

/// Numeric cell when the value is exact as `f64`, text cell otherwise.
fn write_integer(sheet: &mut Worksheet, row: u32, col: u16, value: i128) -> Result<()> {
    if value.abs() <= MAX_EXACT_INT {
        sheet.write_number(row, col, value as f64)?;
    } else {
        sheet.write_string(row, col, value.to_string())?;
    }
    Ok(())
}
