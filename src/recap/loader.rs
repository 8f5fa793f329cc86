use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use tracing::debug;

use crate::error::{ParseError, SheetKind};

pub const ATTENDANCE_COLUMNS: [&str; 6] = [
    "NIK",
    "User Name",
    "Department",
    "Date",
    "First-In Time",
    "Last-Out Time",
];

pub const LEAVE_COLUMNS: [&str; 4] = ["NIK", "Start Date", "End Date", "Reason Cuti"];

/// A raw spreadsheet value, before any normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    /// Native date/time cell, as an Excel 1900-system serial.
    DateTime(f64),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => Cell::DateTime(dt.as_f64()),
        }
    }
}

/// One row projected onto a fixed column order.
pub type RawRow<const N: usize> = [Cell; N];

pub type RawAttendance = Vec<RawRow<6>>;
pub type RawLeave = Vec<RawRow<4>>;

pub fn load_attendance(streams: &[Vec<u8>]) -> Result<RawAttendance, ParseError> {
    load_tables(SheetKind::Attendance, streams, &ATTENDANCE_COLUMNS)
}

pub fn load_leave(streams: &[Vec<u8>]) -> Result<RawLeave, ParseError> {
    load_tables(SheetKind::Leave, streams, &LEAVE_COLUMNS)
}

/// Parses every stream and concatenates the rows in input order.
/// Zero streams yield an empty relation.
fn load_tables<const N: usize>(
    kind: SheetKind,
    streams: &[Vec<u8>],
    columns: &[&'static str; N],
) -> Result<Vec<RawRow<N>>, ParseError> {
    let mut rows = Vec::new();
    for (i, bytes) in streams.iter().enumerate() {
        let sheet = read_sheet(kind, i + 1, bytes, columns)?;
        debug!(%kind, file = i + 1, rows = sheet.len(), "sheet loaded");
        rows.extend(sheet);
    }
    Ok(rows)
}

fn read_sheet<const N: usize>(
    kind: SheetKind,
    index: usize,
    bytes: &[u8],
    columns: &[&'static str; N],
) -> Result<Vec<RawRow<N>>, ParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|source| ParseError::Workbook { kind, index, source })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ParseError::NoSheet { kind, index })?
        .map_err(|source| ParseError::Workbook { kind, index, source })?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|c| c.to_string().trim().to_string()).collect())
        .unwrap_or_default();

    let mut positions = [0usize; N];
    for (slot, column) in positions.iter_mut().zip(columns.iter().copied()) {
        *slot = header
            .iter()
            .position(|h| h == column)
            .ok_or(ParseError::MissingColumn { kind, index, column })?;
    }

    Ok(rows
        .filter_map(|row| {
            let cells: RawRow<N> = std::array::from_fn(|i| {
                row.get(positions[i]).map(Cell::from).unwrap_or(Cell::Empty)
            });
            // padding rows at the bottom of exported sheets
            (!cells.iter().all(Cell::is_empty)).then_some(cells)
        })
        .collect())
}
