use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use inventario_core::MovementRecord;

/// Column layout of the consolidated sheet, in fixed order.
pub const COLUMNS: [&str; 8] = [
    "Read Date",
    "Read Time",
    "Branch",
    "Product Code",
    "Warehouse",
    "Lot",
    "Weight",
    "Source Location",
];

const SHEET_NAME: &str = "Inventario Geral";
const WEIGHT_COL: u16 = 6;
const SOURCE_COL: u16 = 7;
/// Extra width on top of the longest cell in each column.
const WIDTH_MARGIN: usize = 4;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("workbook error: {0}")]
    Xlsx(#[from] XlsxError),
}

/// Serialize the consolidated records into a single-sheet workbook.
///
/// Absent fields stay blank (never zero or empty-string placeholders),
/// weights render with three decimal places, and each column is widened to
/// fit its longest value.
pub fn write_workbook(records: &[MovementRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let weight_format = Format::new().set_num_format("0.000");
    let mut widths: Vec<usize> = COLUMNS.iter().map(|h| h.chars().count()).collect();

    for (col, header) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;

        let texts: [Option<String>; 6] = [
            Some(record.read_date.clone()),
            Some(record.read_time.clone()),
            record.branch.clone(),
            record.product_code.clone(),
            record.warehouse.as_deref().map(format_warehouse),
            Some(record.lot.clone()),
        ];
        for (col, value) in texts.iter().enumerate() {
            if let Some(value) = value {
                sheet.write_string(row, col as u16, value.as_str())?;
                widths[col] = widths[col].max(value.chars().count());
            }
        }

        if let Some(weight) = record.weight {
            let value = weight.value().to_f64().unwrap_or(0.0);
            sheet.write_number_with_format(row, WEIGHT_COL, value, &weight_format)?;
            widths[WEIGHT_COL as usize] =
                widths[WEIGHT_COL as usize].max(weight.to_string().chars().count());
        }

        sheet.write_string(row, SOURCE_COL, record.source_label.as_str())?;
        widths[SOURCE_COL as usize] =
            widths[SOURCE_COL as usize].max(record.source_label.chars().count());
    }

    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, (width + WIDTH_MARGIN) as f64)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Warehouse codes are numeric on most labels; render them zero-padded to
/// two digits, dropping a trailing ".0"-style fraction. Anything non-numeric
/// passes through unchanged.
pub fn format_warehouse(raw: &str) -> String {
    let digits: String = raw.chars().filter(|&c| c != '.').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return raw.to_string();
    }
    let integral = raw.split('.').next().unwrap_or(raw);
    format!("{integral:0>2}")
}
