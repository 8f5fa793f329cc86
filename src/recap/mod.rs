//! Recap engine: attendance + leave sheets in, one pivoted recap workbook out.
//!
//! The pipeline is loader → normalizer → pivot → summary → writer. Each stage
//! owns its output and hands it to the next; nothing is shared between calls.

pub mod loader;
pub mod normalizer;
pub mod pivot;
pub mod summary;
pub mod writer;

use tracing::{info, instrument};

use crate::error::{ParseError, RecapError};
use crate::model::recap::RecapTable;

/// Runs every stage up to the summary.
///
/// `Ok(None)` means no attendance row carried a usable date, so there is
/// nothing to recap. Structural problems with any sheet, or a date span too
/// wide for one worksheet, are a `ParseError`.
#[instrument(skip_all, fields(attendance_files = attendance.len(), leave_files = leave.len()))]
pub fn build_recap(attendance: &[Vec<u8>], leave: &[Vec<u8>]) -> Result<Option<RecapTable>, RecapError> {
    let raw_attendance = loader::load_attendance(attendance)?;
    let raw_leave = loader::load_leave(leave)?;

    let attendance = normalizer::normalize_attendance(raw_attendance);
    let leave = normalizer::normalize_leave(raw_leave);
    if attendance.is_empty() {
        info!("no attendance rows to recap");
        return Ok(None);
    }

    let Some(dates) = pivot::date_range(&attendance) else {
        info!(rows = attendance.len(), "no attendance row has a parseable date");
        return Ok(None);
    };
    if dates.len() > writer::MAX_DAYS {
        return Err(ParseError::SpanTooWide {
            start: dates.start(),
            end: dates.end(),
            days: dates.len(),
            max: writer::MAX_DAYS,
        }
        .into());
    }

    let pivot = pivot::build_pivot(dates, &attendance, &leave);

    let reasons = summary::collect_leave_reasons(&leave);
    let table = summary::summarize(pivot, &reasons);
    info!(
        employees = table.rows.len(),
        days = table.dates.len(),
        leave_rows = leave.len(),
        "recap built"
    );
    Ok(Some(table))
}

/// Full pipeline, returning the serialized workbook.
pub fn generate_recap(attendance: &[Vec<u8>], leave: &[Vec<u8>]) -> Result<Option<Vec<u8>>, RecapError> {
    match build_recap(attendance, leave)? {
        Some(table) => Ok(Some(writer::write_recap(&table)?)),
        None => Ok(None),
    }
}
