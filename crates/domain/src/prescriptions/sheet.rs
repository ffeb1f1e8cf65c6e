use rust_xlsxwriter::{Format, Workbook};

use crate::errors::Error;

use super::PrescriptionRecord;

pub const SHEET_NAME: &str = "Medical Coding";

pub const FILE_NAME: &str = "medical_coding.xlsx";

pub const CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Header text and width of each column, in record cell order.
pub const COLUMNS: [(&str, f64); 7] = [
    ("Patient Name", 25.0),
    ("Date", 15.0),
    ("Disease", 25.0),
    ("ICD-10 Code", 15.0),
    ("Medicine", 25.0),
    ("Medicine Code", 20.0),
    ("Dosage", 30.0),
];

/// Renders `records` as an xlsx workbook: a header row, then one row per record.
pub fn render(records: &[PrescriptionRecord]) -> Result<Vec<u8>, Error> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, (title, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        sheet.set_column_width(col, *width)?;
        sheet.write_string_with_format(0, col, *title, &header)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, value) in record.cells().iter().enumerate() {
            sheet.write_string(row, col as u16, *value)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}
