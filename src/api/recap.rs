use actix_multipart::Multipart;
use actix_web::{
    HttpResponse,
    http::header::CONTENT_DISPOSITION,
    web,
};
use futures_util::TryStreamExt;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::{ApiError, SheetKind};
use crate::recap;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// All parts of one upload, fully buffered.
#[derive(Debug, Default)]
pub struct Upload {
    pub attendance: Vec<Vec<u8>>,
    pub leave: Vec<Vec<u8>>,
    pub total_bytes: usize,
}

fn classify(field_name: &str) -> Option<SheetKind> {
    match field_name {
        "absen_files" | "absen_file" => Some(SheetKind::Attendance),
        "cuti_files" | "cuti_file" => Some(SheetKind::Leave),
        _ => None,
    }
}

/// Reads every part into memory, enforcing `limit` over the whole request.
/// A part with no filename and no bytes is a file input left blank and is
/// skipped. A named but empty file goes to the engine and fails to parse.
async fn read_upload(mut payload: Multipart, limit: usize) -> Result<Upload, ApiError> {
    let mut upload = Upload::default();

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();
        let unnamed = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .is_none_or(str::is_empty);
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            upload.total_bytes += chunk.len();
            if upload.total_bytes > limit {
                return Err(ApiError::TooLarge { limit });
            }
            bytes.extend_from_slice(&chunk);
        }

        match classify(&name) {
            _ if bytes.is_empty() && unnamed => debug!(field = %name, "blank file input skipped"),
            Some(SheetKind::Attendance) => upload.attendance.push(bytes),
            Some(SheetKind::Leave) => upload.leave.push(bytes),
            None => debug!(field = %name, "unknown part ignored"),
        }
    }

    Ok(upload)
}

/// Build the attendance recap workbook
#[utoipa::path(
    post,
    path = "/api/rekap",
    request_body(
        content = crate::models::RecapForm,
        description = "Attendance sheets (absen_files) and leave sheets (cuti_files)",
        content_type = "multipart/form-data"
    ),
    responses(
        (status = 200, description = "Recap workbook (rekap.xlsx)", body = String,
         content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "No attendance data, or a malformed sheet", body = crate::models::DetailResponse,
         example = json!({ "detail": "Tidak ada data absen untuk direkap." })),
        (status = 413, description = "Upload too large", body = crate::models::DetailResponse),
        (status = 429, description = "Too many requests"),
        (status = 500, description = "Internal server error", body = crate::models::DetailResponse)
    ),
    tag = "Recap"
)]
#[instrument(skip_all)]
pub async fn create_recap(
    config: web::Data<Config>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let upload = read_upload(payload, config.max_upload_bytes).await?;
    info!(
        attendance_files = upload.attendance.len(),
        leave_files = upload.leave.len(),
        bytes = upload.total_bytes,
        "recap upload received"
    );

    let workbook =
        web::block(move || recap::generate_recap(&upload.attendance, &upload.leave)).await??;

    match workbook {
        Some(bytes) => Ok(HttpResponse::Ok()
            .content_type(XLSX_CONTENT_TYPE)
            .insert_header((CONTENT_DISPOSITION, "attachment; filename=rekap.xlsx"))
            .body(bytes)),
        None => Err(ApiError::NoData),
    }
}
