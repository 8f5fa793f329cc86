use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use strum::IntoEnumIterator;

use crate::model::recap::{DayField, RecapTable};
use crate::utils::day_name::day_name_of;

pub const SHEET_NAME: &str = "Rekap";
/// Rows taken by the three header levels.
pub const HEADER_ROWS: u32 = 3;

const IDENTITY_HEADERS: [&str; 4] = ["No", "NIK", "User Name", "Department"];
const SUMMARY_HEADERS: [&str; 4] = ["Jumlah Absen", "Tidak Absen", "Jumlah Cuti", "Reason Cuti"];
/// Column 0 is the row index, identity columns follow.
const FIRST_DAY_COL: u16 = 1 + IDENTITY_HEADERS.len() as u16;

/// Columns available in one xlsx worksheet.
const MAX_COLUMNS: usize = 16_384;
/// Longest date span whose In/Out/Reason triplets still fit in one sheet.
pub const MAX_DAYS: usize = (MAX_COLUMNS - FIRST_DAY_COL as usize - SUMMARY_HEADERS.len()) / 3;

/// Serializes the recap into a single-sheet xlsx workbook.
pub fn write_recap(table: &RecapTable) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold().set_align(FormatAlign::Center);
    write_header(worksheet, table, &header)?;
    write_rows(worksheet, table)?;
    worksheet.set_freeze_panes(HEADER_ROWS, FIRST_DAY_COL)?;

    workbook.save_to_buffer()
}

fn write_header(worksheet: &mut Worksheet, table: &RecapTable, header: &Format) -> Result<(), XlsxError> {
    for (i, label) in IDENTITY_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, 1 + i as u16, *label, header)?;
    }

    let mut col = FIRST_DAY_COL;
    for date in table.dates.iter() {
        let last = col + DayField::iter().count() as u16 - 1;
        worksheet.merge_range(0, col, 0, last, &date.format("%d/%m/%Y").to_string(), header)?;
        worksheet.merge_range(1, col, 1, last, day_name_of(date), header)?;
        for (offset, field) in DayField::iter().enumerate() {
            worksheet.write_string_with_format(2, col + offset as u16, field.to_string(), header)?;
        }
        col = last + 1;
    }

    let last = col + SUMMARY_HEADERS.len() as u16 - 1;
    worksheet.merge_range(0, col, 0, last, "Summary", header)?;
    worksheet.merge_range(1, col, 1, last, "", header)?;
    for (offset, label) in SUMMARY_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(2, col + offset as u16, *label, header)?;
    }
    Ok(())
}

fn write_rows(worksheet: &mut Worksheet, table: &RecapTable) -> Result<(), XlsxError> {
    for (i, row) in table.rows.iter().enumerate() {
        let r = HEADER_ROWS + i as u32;
        worksheet.write_number(r, 0, i as f64)?;
        worksheet.write_number(r, 1, row.no as f64)?;
        worksheet.write_string(r, 2, &row.employee.employee_id)?;
        worksheet.write_string(r, 3, &row.employee.name)?;
        worksheet.write_string(r, 4, &row.employee.department)?;

        // Reason cells have no content and stay blank
        for (offset, column) in table.dates.columns().enumerate() {
            if let Some(cell) = row.cell(&table.dates, column) {
                worksheet.write_string(r, FIRST_DAY_COL + offset as u16, cell.as_text())?;
            }
        }

        let col = FIRST_DAY_COL + (3 * table.dates.len()) as u16;
        let summary = &row.summary;
        worksheet.write_number(r, col, summary.present_count)?;
        worksheet.write_number(r, col + 1, summary.absent_count)?;
        worksheet.write_number(r, col + 2, summary.leave_count)?;
        worksheet.write_string(r, col + 3, &summary.leave_reasons)?;
    }
    Ok(())
}
