use actix_multipart::MultipartError;
use chrono::NaiveDate;
use actix_web::{HttpResponse, ResponseError, error::BlockingError, http::StatusCode};
use strum_macros::Display;
use thiserror::Error;

use crate::models::DetailResponse;

/// Shown when the uploaded attendance sheets hold nothing to recap.
pub const NO_DATA_DETAIL: &str = "Tidak ada data absen untuk direkap.";

/// Which of the two upload lists a sheet came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SheetKind {
    Attendance,
    Leave,
}

/// Structural failure reading one uploaded sheet. Aborts the whole recap.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{kind} file #{index} is not a readable spreadsheet: {source}")]
    Workbook {
        kind: SheetKind,
        index: usize,
        #[source]
        source: calamine::Error,
    },

    #[error("{kind} file #{index} contains no sheets")]
    NoSheet { kind: SheetKind, index: usize },

    #[error("{kind} file #{index} is missing required column `{column}`")]
    MissingColumn {
        kind: SheetKind,
        index: usize,
        column: &'static str,
    },

    #[error("attendance dates span {days} days ({start} to {end}), more than the {max} a recap sheet can hold")]
    SpanTooWide {
        start: NaiveDate,
        end: NaiveDate,
        days: usize,
        max: usize,
    },
}

#[derive(Error, Debug)]
pub enum RecapError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to write recap workbook: {0}")]
    Render(#[from] rust_xlsxwriter::XlsxError),
}

impl ResponseError for RecapError {
    fn status_code(&self) -> StatusCode {
        match self {
            RecapError::Parse(_) => StatusCode::BAD_REQUEST,
            RecapError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let detail = match self {
            RecapError::Parse(e) => e.to_string(),
            RecapError::Render(_) => "Internal Server Error".to_string(),
        };
        HttpResponse::build(self.status_code()).json(DetailResponse { detail })
    }
}

/// Everything the recap endpoint can answer with besides a workbook.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Recap(#[from] RecapError),

    #[error("{}", NO_DATA_DETAIL)]
    NoData,

    #[error("malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("upload exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("recap task failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Recap(e) => e.status_code(),
            ApiError::NoData | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Recap(e) => e.error_response(),
            ApiError::Blocking(_) => HttpResponse::InternalServerError().json(DetailResponse {
                detail: "Internal Server Error".to_string(),
            }),
            other => HttpResponse::build(other.status_code()).json(DetailResponse {
                detail: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_client_errors() {
        let err = RecapError::from(ParseError::MissingColumn {
            kind: SheetKind::Leave,
            index: 1,
            column: "Reason Cuti",
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "leave file #1 is missing required column `Reason Cuti`"
        );
    }

    #[test]
    fn no_data_is_a_client_error_with_fixed_detail() {
        let err = ApiError::NoData;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), NO_DATA_DETAIL);
        assert_eq!(
            ApiError::TooLarge { limit: 10 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn oversized_date_span_is_a_client_error() {
        let err = RecapError::from(ParseError::SpanTooWide {
            start: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            days: 8767,
            max: 5458,
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("attendance dates span 8767 days"));
    }

    #[test]
    fn render_errors_are_server_errors() {
        let err = RecapError::from(rust_xlsxwriter::XlsxError::ParameterError("bad".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
