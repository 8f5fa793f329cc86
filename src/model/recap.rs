use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::model::employee::Employee;

/// Marker written into In/Out cells for a leave day.
pub const LEAVE_MARKER: &str = "Cuti";
/// Marker written into In/Out cells when no punch was recorded.
pub const NO_PUNCH_MARKER: &str = "-";

/// Content of a single In or Out cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum DayCell {
    Punch(String),
    #[default]
    NoPunch,
    OnLeave,
}

impl DayCell {
    /// Builds a cell from a raw punch value.
    ///
    /// Time clocks export `00:00...` for a missing punch, so any value with that
    /// prefix (and blank or `-` values) becomes `NoPunch`.
    pub fn from_punch(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if !value.is_empty() && value != NO_PUNCH_MARKER && !value.starts_with("00:00") => {
                DayCell::Punch(value.to_string())
            }
            _ => DayCell::NoPunch,
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            DayCell::Punch(time) => time,
            DayCell::NoPunch => NO_PUNCH_MARKER,
            DayCell::OnLeave => LEAVE_MARKER,
        }
    }
}

/// Third header level under every date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum DayField {
    In,
    Out,
    /// Present in the header but never filled.
    Reason,
}

/// Composite key of a per-day column. The weekday name is derived at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub field: DayField,
}

/// Inclusive, daily range of dates spanned by the attendance data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Returns `None` when `end` precedes `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Smallest range covering every date, or `None` for an empty iterator.
    pub fn spanning<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
        for date in dates {
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(date), hi.max(date)),
                None => (date, date),
            });
        }
        bounds.map(|(start, end)| Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Position of `date` within the range.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        (self.start <= date && date <= self.end).then(|| (date - self.start).num_days() as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.len() as u64).filter_map(move |offset| self.start.checked_add_days(Days::new(offset)))
    }

    /// Every per-day column in header order.
    pub fn columns(&self) -> impl Iterator<Item = DayColumn> + '_ {
        use strum::IntoEnumIterator;
        self.iter()
            .flat_map(|date| DayField::iter().map(move |field| DayColumn { date, field }))
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// In/Out pair for one employee on one date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    pub check_in: DayCell,
    pub check_out: DayCell,
}

impl DayEntry {
    pub fn get(&self, field: DayField) -> Option<&DayCell> {
        match field {
            DayField::In => Some(&self.check_in),
            DayField::Out => Some(&self.check_out),
            DayField::Reason => None,
        }
    }
}

/// Roster row after attendance fill-in and leave overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    /// 1-based, in first-seen order.
    pub no: usize,
    pub employee: Employee,
    /// One entry per date of the range, in date order.
    pub days: Vec<DayEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub present_count: u32,
    pub absent_count: u32,
    pub leave_count: u32,
    /// Comma-joined distinct reasons, or `-` when there are none.
    pub leave_reasons: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecapRow {
    pub no: usize,
    pub employee: Employee,
    pub days: Vec<DayEntry>,
    pub summary: Summary,
}

impl RecapRow {
    pub fn cell(&self, range: &DateRange, column: DayColumn) -> Option<&DayCell> {
        range
            .index_of(column.date)
            .and_then(|idx| self.days.get(idx))
            .and_then(|entry| entry.get(column.field))
    }
}

/// The consolidated recap: one row per employee, three columns per date, four summary columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecapTable {
    pub dates: DateRange,
    pub rows: Vec<RecapRow>,
}

impl RecapTable {
    pub const IDENTITY_COLUMNS: usize = 4;
    pub const SUMMARY_COLUMNS: usize = 4;

    /// Number of logical columns, excluding the leading row index.
    pub fn column_count(&self) -> usize {
        Self::IDENTITY_COLUMNS + 3 * self.dates.len() + Self::SUMMARY_COLUMNS
    }
}
