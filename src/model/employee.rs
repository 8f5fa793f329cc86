use serde::Serialize;

/// Identity of one roster row, as observed in the attendance sheets.
///
/// `employee_id` (the NIK column) is the join key against leave sheets. It is
/// always trimmed text, whatever cell type the sheet stored it as.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Employee {
    pub employee_id: String,
    pub name: String,
    pub department: String,
}
