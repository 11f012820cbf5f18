use std::time::Instant;

use actix_web::{HttpResponse, post, web};
use log::{info, warn};

use super::error::ApiError;
use super::models::{AppState, EventResponse, EventsRequest};

/// `ValueUpdated` events in the requested block range (trailing window by
/// default). RPC failures propagate as 503/500, never as an empty list.
#[post("/events")]
pub async fn post_events(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, ApiError> {
    let t0 = Instant::now();
    let req: EventsRequest = if body.iter().all(u8::is_ascii_whitespace) {
        EventsRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("invalid events query: {e}")))?
    };

    let events = state
        .contract
        .read_events(req.from_block, req.to_block)
        .await
        .map_err(|e| {
            warn!(
                "POST /blockchain/events - from={:?} to={:?} failed: {} ({})",
                req.from_block,
                req.to_block,
                e,
                e.category().as_str()
            );
            ApiError::Read(e)
        })?;

    info!(
        "POST /blockchain/events - from={:?} to={:?} -> {} events ({} ms)",
        req.from_block,
        req.to_block,
        events.len(),
        t0.elapsed().as_millis()
    );
    let resp: Vec<EventResponse> = events.iter().map(EventResponse::from).collect();
    Ok(HttpResponse::Ok().json(resp))
}
