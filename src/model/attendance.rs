use chrono::NaiveDate;
use serde::Serialize;

use crate::model::employee::Employee;

/// One normalized row of an attendance sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceRecord {
    pub employee: Employee,
    /// `None` when the date cell could not be parsed.
    pub date: Option<NaiveDate>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
}
