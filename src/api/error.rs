use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::error::{Error, ErrorCategory};

pub const MSG_RPC_TIMEOUT: &str = "RPC timeout. Silakan coba beberapa saat lagi.";
pub const MSG_RPC_UNREACHABLE: &str = "Tidak dapat terhubung ke blockchain RPC.";
pub const MSG_READ_FAILED: &str = "Terjadi kesalahan saat membaca data blockchain.";

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Reading chain data failed.
    #[error(transparent)]
    Read(Error),

    /// Submitting or confirming a write failed.
    #[error(transparent)]
    Write(Error),

    /// The write was broadcast but its receipt could not be obtained.
    #[error("transaction {tx_hash} not confirmed: {source}")]
    Unconfirmed { tx_hash: String, source: Error },

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("writes are disabled: no signer configured")]
    WritesDisabled,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status_code: u16,
    message: String,
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<ErrorCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tx_hash: Option<String>,
}

fn read_message(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Timeout => MSG_RPC_TIMEOUT,
        ErrorCategory::NetworkUnreachable => MSG_RPC_UNREACHABLE,
        _ => MSG_READ_FAILED,
    }
}

fn write_status(category: ErrorCategory) -> StatusCode {
    match category {
        ErrorCategory::Rejected => StatusCode::FORBIDDEN,
        ErrorCategory::WrongNetwork => StatusCode::CONFLICT,
        ErrorCategory::InsufficientFunds => StatusCode::PAYMENT_REQUIRED,
        ErrorCategory::Reverted => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCategory::Timeout | ErrorCategory::NetworkUnreachable => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ErrorCategory::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Read(Error::Range(_))
            | ApiError::Write(Error::Range(_))
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Read(err) => {
                if err.category().is_transient() {
                    StatusCode::SERVICE_UNAVAILABLE
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
            ApiError::Write(err) | ApiError::Unconfirmed { source: err, .. } => {
                write_status(err.category())
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::WritesDisabled => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (message, category) = match self {
            ApiError::Read(Error::Range(e)) | ApiError::Write(Error::Range(e)) => {
                (e.to_string(), None)
            }
            ApiError::Read(err) => {
                let category = err.category();
                (read_message(category).to_string(), Some(category))
            }
            ApiError::Write(err) | ApiError::Unconfirmed { source: err, .. } => {
                let classified = err.classification();
                (classified.user_message(), Some(classified.category))
            }
            other => (other.to_string(), None),
        };
        let tx_hash = match self {
            ApiError::Unconfirmed { tx_hash, .. } => Some(tx_hash.clone()),
            _ => None,
        };
        HttpResponse::build(status).json(ErrorBody {
            status_code: status.as_u16(),
            message,
            error: status.canonical_reason().unwrap_or("Error"),
            category,
            tx_hash,
        })
    }
}
