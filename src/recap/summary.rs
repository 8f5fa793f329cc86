use std::collections::{BTreeSet, HashMap};

use crate::model::{
    leave_request::LeaveRecord,
    recap::{DateRange, DayCell, DayEntry, RecapRow, RecapTable, Summary, is_weekend},
};
use crate::recap::pivot::Pivot;

/// Written when an employee has no recorded leave reason.
pub const NO_REASON: &str = "-";

/// Distinct leave reasons per NIK.
pub type LeaveReasons = HashMap<String, BTreeSet<String>>;

/// Groups leave rows by NIK, merging duplicate reasons.
pub fn collect_leave_reasons(leave: &[LeaveRecord]) -> LeaveReasons {
    let mut reasons = LeaveReasons::new();
    for request in leave {
        if let Some(reason) = &request.reason {
            reasons
                .entry(request.employee_id.clone())
                .or_default()
                .insert(reason.clone());
        }
    }
    reasons
}

/// Classifies each day's In cell into leave, present or absent.
/// Weekends count toward leave only.
pub fn summarize_days(dates: &DateRange, days: &[DayEntry]) -> (u32, u32, u32) {
    let (mut present, mut absent, mut on_leave) = (0, 0, 0);
    for (date, entry) in dates.iter().zip(days) {
        match &entry.check_in {
            DayCell::OnLeave => on_leave += 1,
            _ if is_weekend(date) => {}
            DayCell::NoPunch => absent += 1,
            DayCell::Punch(_) => present += 1,
        }
    }
    (present, absent, on_leave)
}

pub fn summarize(pivot: Pivot, reasons: &LeaveReasons) -> RecapTable {
    let Pivot { dates, rows } = pivot;
    let rows = rows
        .into_iter()
        .map(|row| {
            let (present_count, absent_count, leave_count) = summarize_days(&dates, &row.days);
            let leave_reasons = match reasons.get(&row.employee.employee_id) {
                Some(set) if !set.is_empty() => set.iter().cloned().collect::<Vec<_>>().join(", "),
                _ => NO_REASON.to_string(),
            };
            RecapRow {
                no: row.no,
                employee: row.employee,
                days: row.days,
                summary: Summary {
                    present_count,
                    absent_count,
                    leave_count,
                    leave_reasons,
                },
            }
        })
        .collect();

    RecapTable { dates, rows }
}
