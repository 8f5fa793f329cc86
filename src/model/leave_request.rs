use chrono::NaiveDate;
use serde::Serialize;

/// One normalized row of a leave sheet. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveRecord {
    pub employee_id: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

impl LeaveRecord {
    /// True when `date` falls inside the leave interval. A missing bound never matches.
    pub fn covers(&self, date: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }
}
