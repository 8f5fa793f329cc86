use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::model::{
    attendance::AttendanceRecord,
    employee::Employee,
    leave_request::LeaveRecord,
    recap::{DateRange, DayCell, DayEntry, PivotRow},
};

/// Wide per-day table before the summary pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Pivot {
    pub dates: DateRange,
    pub rows: Vec<PivotRow>,
}

/// Distinct (NIK, name, department) triples in first-seen order.
pub fn roster(attendance: &[AttendanceRecord]) -> Vec<Employee> {
    let mut seen = HashSet::new();
    attendance
        .iter()
        .filter(|record| seen.insert(&record.employee))
        .map(|record| record.employee.clone())
        .collect()
}

/// Inclusive span of the attendance dates, or `None` when no row carries a usable date.
pub fn date_range(attendance: &[AttendanceRecord]) -> Option<DateRange> {
    DateRange::spanning(attendance.iter().filter_map(|r| r.date))
}

/// Fills one row per roster employee over `dates`, then overlays leave.
pub fn build_pivot(dates: DateRange, attendance: &[AttendanceRecord], leave: &[LeaveRecord]) -> Pivot {
    let mut rows: Vec<PivotRow> = roster(attendance)
        .into_iter()
        .enumerate()
        .map(|(i, employee)| PivotRow {
            no: i + 1,
            employee,
            days: vec![DayEntry::default(); dates.len()],
        })
        .collect();

    // Cells are addressed by NIK alone, so every roster row sharing a NIK is filled.
    let mut rows_by_id: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        rows_by_id
            .entry(row.employee.employee_id.clone())
            .or_default()
            .push(i);
    }

    let mut undated = 0usize;
    for record in attendance {
        let Some(day) = record.date.and_then(|d| dates.index_of(d)) else {
            undated += 1;
            continue;
        };
        let entry = DayEntry {
            check_in: DayCell::from_punch(record.check_in.as_deref()),
            check_out: DayCell::from_punch(record.check_out.as_deref()),
        };
        for &row in rows_by_id.get(&record.employee.employee_id).into_iter().flatten() {
            rows[row].days[day] = entry.clone();
        }
    }
    if undated > 0 {
        debug!(undated, "attendance rows without a parseable date were skipped");
    }

    for request in leave {
        let Some(targets) = rows_by_id.get(&request.employee_id) else {
            continue;
        };
        for (day, date) in dates.iter().enumerate() {
            if !request.covers(date) {
                continue;
            }
            for &row in targets {
                rows[row].days[day] = DayEntry {
                    check_in: DayCell::OnLeave,
                    check_out: DayCell::OnLeave,
                };
            }
        }
    }

    debug!(
        employees = rows.len(),
        start = %dates.start(),
        end = %dates.end(),
        "pivot built"
    );

    Pivot { dates, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: &str, name: &str) -> Employee {
        Employee {
            employee_id: id.to_string(),
            name: name.to_string(),
            department: "Eng".to_string(),
        }
    }

    fn punch(id: &str, name: &str, on: Option<NaiveDate>, check_in: &str, check_out: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee: employee(id, name),
            date: on,
            check_in: Some(check_in.to_string()),
            check_out: Some(check_out.to_string()),
        }
    }

    fn leave(id: &str, start: NaiveDate, end: NaiveDate) -> LeaveRecord {
        LeaveRecord {
            employee_id: id.to_string(),
            start_date: Some(start),
            end_date: Some(end),
            reason: Some("Sick".to_string()),
        }
    }

    fn pivot_of(attendance: &[AttendanceRecord], leave: &[LeaveRecord]) -> Option<Pivot> {
        date_range(attendance).map(|dates| build_pivot(dates, attendance, leave))
    }

    #[test]
    fn roster_keeps_first_seen_order() {
        let attendance = vec![
            punch("E2", "Bob", Some(date(2024, 3, 4)), "08:00", "17:00"),
            punch("E1", "Alice", Some(date(2024, 3, 4)), "08:00", "17:00"),
            punch("E2", "Bob", Some(date(2024, 3, 5)), "08:00", "17:00"),
        ];
        let names: Vec<_> = roster(&attendance).into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["Bob", "Alice"]);
    }

    #[test]
    fn empty_or_undated_attendance_has_no_pivot() {
        assert!(pivot_of(&[], &[]).is_none());
        let undated = vec![punch("E1", "Alice", None, "08:00", "17:00")];
        assert!(pivot_of(&undated, &[]).is_none());
    }

    #[test]
    fn range_gaps_default_to_no_punch() {
        let attendance = vec![
            punch("E1", "Alice", Some(date(2024, 3, 4)), "08:00", "17:00"),
            punch("E1", "Alice", Some(date(2024, 3, 6)), "08:05", "00:00:00"),
            punch("E1", "Alice", None, "09:00", "18:00"),
        ];
        let pivot = pivot_of(&attendance, &[]).unwrap();
        assert_eq!(pivot.dates.len(), 3);
        let days = &pivot.rows[0].days;
        assert_eq!(days[0].check_in, DayCell::Punch("08:00".into()));
        assert_eq!(days[1], DayEntry::default());
        assert_eq!(days[2].check_in, DayCell::Punch("08:05".into()));
        assert_eq!(days[2].check_out, DayCell::NoPunch);
    }

    #[test]
    fn later_rows_overwrite_earlier_ones() {
        let attendance = vec![
            punch("E1", "Alice", Some(date(2024, 3, 4)), "08:00", "17:00"),
            punch("E1", "Alice", Some(date(2024, 3, 4)), "09:30", "18:30"),
        ];
        let pivot = pivot_of(&attendance, &[]).unwrap();
        assert_eq!(pivot.rows[0].days[0].check_in, DayCell::Punch("09:30".into()));
    }

    #[test]
    fn leave_overrides_punches_inside_the_range_only() {
        let attendance = vec![
            punch("E1", "Alice", Some(date(2024, 3, 4)), "08:00", "17:00"),
            punch("E1", "Alice", Some(date(2024, 3, 6)), "08:00", "17:00"),
            punch("E2", "Bob", Some(date(2024, 3, 5)), "08:00", "17:00"),
        ];
        let requests = vec![
            leave("E1", date(2024, 3, 1), date(2024, 3, 4)),
            leave("E9", date(2024, 3, 4), date(2024, 3, 6)),
        ];
        let pivot = pivot_of(&attendance, &requests).unwrap();
        let alice = &pivot.rows[0];
        assert_eq!(alice.days[0].check_in, DayCell::OnLeave);
        assert_eq!(alice.days[0].check_out, DayCell::OnLeave);
        assert_eq!(alice.days[2].check_in, DayCell::Punch("08:00".into()));
        assert!(pivot.rows[1].days.iter().all(|d| d.check_in != DayCell::OnLeave));
        assert_eq!(pivot.rows.len(), 2);
    }

    #[test]
    fn rows_sharing_a_nik_are_filled_together() {
        let attendance = vec![
            punch("E1", "Alice", Some(date(2024, 3, 4)), "08:00", "17:00"),
            punch("E1", "Alice B.", Some(date(2024, 3, 5)), "08:10", "17:10"),
        ];
        let pivot = pivot_of(&attendance, &[]).unwrap();
        assert_eq!(pivot.rows.len(), 2);
        assert_eq!(pivot.rows[0].days, pivot.rows[1].days);
        assert_eq!(pivot.rows[1].no, 2);
    }
}
