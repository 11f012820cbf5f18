use std::time::Instant;

use actix_web::{HttpResponse, get, post, web};
use log::{debug, info, warn};

use super::error::ApiError;
use super::models::{AppState, SetValueRequest, SetValueResponse, ValueResponse};
use crate::error::{Error, ErrorCategory};
use crate::notify::NotificationKind;

fn failure_kind(err: &Error) -> NotificationKind {
    match err.category() {
        ErrorCategory::WrongNetwork => NotificationKind::Warning,
        _ => NotificationKind::Failure,
    }
}

/// Latest value stored in the contract.
#[get("/value")]
pub async fn get_value(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let t0 = Instant::now();
    let value = state.contract.read_value().await.map_err(|e| {
        warn!("GET /blockchain/value - {} ({})", e, e.category().as_str());
        ApiError::Read(e)
    })?;
    info!(
        "GET /blockchain/value - {} ({} ms)",
        value,
        t0.elapsed().as_millis()
    );
    Ok(HttpResponse::Ok().json(ValueResponse {
        value: value.to_string(),
    }))
}

/// Submit `setValue` through the configured signer, optionally waiting for
/// the receipt.
#[post("/value")]
pub async fn post_value(
    state: web::Data<AppState>,
    body: web::Json<SetValueRequest>,
) -> Result<HttpResponse, ApiError> {
    let t0 = Instant::now();
    let writer = state.writer.as_ref().ok_or(ApiError::WritesDisabled)?;
    let value = body.value.to_u256().map_err(ApiError::BadRequest)?;
    debug!("POST /blockchain/value - value={value} wait={}", body.wait);

    state.notify("Sending transaction...", NotificationKind::Status);
    let pending = match writer.submit_set_value(value).await {
        Ok(pending) => pending,
        Err(e) => {
            warn!("POST /blockchain/value - submit failed: {e}");
            state.notify(e.classification().user_message(), failure_kind(&e));
            return Err(ApiError::Write(e));
        }
    };

    let mut resp = SetValueResponse {
        tx_hash: pending.hash().to_string(),
        confirmed: false,
        block_number: None,
    };
    if body.wait {
        match writer.wait_for_confirmation(&pending).await {
            Ok(receipt) => {
                resp.confirmed = true;
                resp.block_number = Some(receipt.block_number.to_string());
                state.notify(
                    "Transaksi berhasil! Nilai di update.",
                    NotificationKind::Success,
                );
            }
            Err(e) => {
                warn!("POST /blockchain/value - {} not confirmed: {e}", resp.tx_hash);
                state.notify(
                    format!("{} ({})", e.classification().user_message(), resp.tx_hash),
                    failure_kind(&e),
                );
                return Err(ApiError::Unconfirmed {
                    tx_hash: resp.tx_hash,
                    source: e,
                });
            }
        }
    }

    info!(
        "POST /blockchain/value - tx={} confirmed={} ({} ms)",
        resp.tx_hash,
        resp.confirmed,
        t0.elapsed().as_millis()
    );
    Ok(HttpResponse::Ok().json(resp))
}
