use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{attendance::AttendanceRecord, employee::Employee, leave_request::LeaveRecord};
use crate::recap::loader::{Cell, RawAttendance, RawLeave};

/// Day-first date layouts, tried before the ISO ones.
/// Two-digit years come first: `%Y` would accept `24` as year 24.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%d %B %y", "%d %b %y",
    "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d", "%d %B %Y", "%d %b %Y",
];

/// Text dates before this year are typos or truncated years.
const MIN_YEAR: i32 = 1900;

const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M", "%d-%m-%Y %H:%M:%S", "%d-%m-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f",
];

/// Serial day zero of the Excel 1900 date system (accounts for the 1900 leap-year bug).
fn excel_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or(NaiveDate::MIN)
}

fn from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > 2_958_465.0 {
        return None;
    }
    excel_epoch().checked_add_days(Days::new(serial.trunc() as u64))
}

/// Parses a date cell, reading ambiguous text day-first.
/// Anything unparseable yields `None`.
pub fn parse_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Number(serial) | Cell::DateTime(serial) => from_serial(*serial),
        Cell::Text(text) => {
            let text = text.trim();
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .or_else(|| {
                    DATETIME_FORMATS
                        .iter()
                        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                        .map(|dt| dt.date())
                })
                .filter(|date| date.year() >= MIN_YEAR)
        }
        Cell::Empty | Cell::Bool(_) => None,
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// String form of an identity cell, trimmed. Integral numbers drop their fraction.
pub fn employee_key(cell: &Cell) -> String {
    text_of(cell).unwrap_or_default()
}

fn text_of(cell: &Cell) -> Option<String> {
    let text = match cell {
        Cell::Empty => return None,
        Cell::Text(s) => s.trim().to_string(),
        Cell::Number(n) | Cell::DateTime(n) => format_number(*n),
        Cell::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Renders a punch cell. Native time cells become `HH:MM:SS`.
pub fn punch_text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::DateTime(serial) => time_of_day(*serial),
        Cell::Number(n) if (0.0..1.0).contains(n) => time_of_day(*n),
        other => text_of(other),
    }
}

fn time_of_day(serial: f64) -> Option<String> {
    let secs = (serial.fract() * 86_400.0).round() as u32 % 86_400;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).map(|t| t.format("%H:%M:%S").to_string())
}

pub fn normalize_attendance(raw: RawAttendance) -> Vec<AttendanceRecord> {
    raw.iter()
        .map(|[nik, name, department, date, first_in, last_out]| AttendanceRecord {
            employee: Employee {
                employee_id: employee_key(nik),
                name: text_of(name).unwrap_or_default(),
                department: text_of(department).unwrap_or_default(),
            },
            date: parse_date(date),
            check_in: punch_text(first_in),
            check_out: punch_text(last_out),
        })
        .collect()
}

pub fn normalize_leave(raw: RawLeave) -> Vec<LeaveRecord> {
    raw.iter()
        .map(|[nik, start, end, reason]| LeaveRecord {
            employee_id: employee_key(nik),
            start_date: parse_date(start),
            end_date: parse_date(end),
            reason: text_of(reason),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dates_are_day_first() {
        assert_eq!(parse_date(&text("05/03/2024")), Some(date(2024, 3, 5)));
        assert_eq!(parse_date(&text("05-03-2024")), Some(date(2024, 3, 5)));
        assert_eq!(parse_date(&text(" 05.03.2024 ")), Some(date(2024, 3, 5)));
        assert_eq!(parse_date(&text("05/03/24")), Some(date(2024, 3, 5)));
        assert_eq!(parse_date(&text("05/03/2024 08:15")), Some(date(2024, 3, 5)));
        assert_eq!(parse_date(&text("5 March 2024")), Some(date(2024, 3, 5)));
        assert_eq!(parse_date(&text("05.03.24")), Some(date(2024, 3, 5)));
        assert_eq!(parse_date(&text("5 Mar 24")), Some(date(2024, 3, 5)));
        assert_eq!(parse_date(&text("5 March 24")), Some(date(2024, 3, 5)));
    }

    #[test]
    fn iso_dates_stay_year_first() {
        assert_eq!(parse_date(&text("2024-03-05")), Some(date(2024, 3, 5)));
        assert_eq!(parse_date(&text("2024-03-05 07:59:00")), Some(date(2024, 3, 5)));
        assert_eq!(parse_date(&text("2024-03-05T07:59:00")), Some(date(2024, 3, 5)));
    }

    #[test]
    fn serial_dates_use_the_1900_system() {
        assert_eq!(parse_date(&Cell::Number(45355.0)), Some(date(2024, 3, 4)));
        assert_eq!(parse_date(&Cell::DateTime(45355.75)), Some(date(2024, 3, 4)));
    }

    #[test]
    fn unparseable_dates_become_none() {
        assert_eq!(parse_date(&text("31/02/2024")), None);
        assert_eq!(parse_date(&text("not a date")), None);
        assert_eq!(parse_date(&Cell::Empty), None);
        assert_eq!(parse_date(&Cell::Bool(true)), None);
        assert_eq!(parse_date(&Cell::Number(-3.0)), None);
        assert_eq!(parse_date(&text("0024-03-05")), None);
        assert_eq!(parse_date(&text("05/03/0024")), None);
    }

    #[test]
    fn employee_keys_are_trimmed_strings() {
        assert_eq!(employee_key(&text("  E101 ")), "E101");
        assert_eq!(employee_key(&Cell::Number(1001.0)), "1001");
        assert_eq!(employee_key(&Cell::Number(10.5)), "10.5");
        assert_eq!(employee_key(&Cell::Empty), "");
    }

    #[test]
    fn native_times_render_as_clock_text() {
        assert_eq!(punch_text(&Cell::DateTime(0.5)).as_deref(), Some("12:00:00"));
        assert_eq!(punch_text(&Cell::Number(8.0 / 24.0)).as_deref(), Some("08:00:00"));
        assert_eq!(punch_text(&text("00:00:30")).as_deref(), Some("00:00:30"));
        assert_eq!(punch_text(&Cell::Empty), None);
    }

    #[test]
    fn leave_rows_keep_null_bounds_and_blank_reasons() {
        let leave = normalize_leave(vec![[
            text(" E7 "),
            text("garbage"),
            text("06/03/2024"),
            text("  "),
        ]]);
        assert_eq!(leave[0].employee_id, "E7");
        assert_eq!(leave[0].start_date, None);
        assert_eq!(leave[0].end_date, Some(date(2024, 3, 6)));
        assert_eq!(leave[0].reason, None);
    }

    #[test]
    fn attendance_rows_are_normalized() {
        let records = normalize_attendance(vec![[
            Cell::Number(42.0),
            text("Alice "),
            text("Eng"),
            text("04/03/2024"),
            text("08:00"),
            Cell::Empty,
        ]]);
        let record = &records[0];
        assert_eq!(record.employee.employee_id, "42");
        assert_eq!(record.employee.name, "Alice");
        assert_eq!(record.date, Some(date(2024, 3, 4)));
        assert_eq!(record.check_in.as_deref(), Some("08:00"));
        assert_eq!(record.check_out, None);
    }
}
