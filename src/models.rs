use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every non-workbook response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DetailResponse {
    #[schema(example = "Tidak ada data absen untuk direkap.")]
    pub detail: String,
}

/// Multipart form accepted by the recap endpoint. Documentation only; the
/// handler streams the parts itself.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct RecapForm {
    /// Attendance sheets (`absen_file` is accepted too)
    #[schema(value_type = Vec<String>, format = Binary)]
    pub absen_files: Vec<Vec<u8>>,
    /// Leave sheets (`cuti_file` is accepted too)
    #[schema(value_type = Vec<String>, format = Binary)]
    pub cuti_files: Vec<Vec<u8>>,
}
