use chrono::{Datelike, NaiveDate, Weekday};

/// Localized (Indonesian) weekday name used as the second header level.
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

pub fn day_name_of(date: NaiveDate) -> &'static str {
    day_name(date.weekday())
}
