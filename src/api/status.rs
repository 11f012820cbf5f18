use actix_web::{HttpResponse, get, web};

use super::error::ApiError;
use super::models::{AppState, StatusResponse};

/// Connection overview: which chain the RPC endpoint serves, its head, and
/// whether that matches the configured target.
#[get("/status")]
pub async fn get_status(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let chain_id = state.contract.chain_id().await.map_err(ApiError::Read)?;
    let head = state.contract.block_number().await.map_err(ApiError::Read)?;

    Ok(HttpResponse::Ok().json(StatusResponse {
        chain_id,
        expected_chain_id: state.config.chain_id,
        on_expected_chain: chain_id == state.config.chain_id,
        head,
        contract: state.contract.address().to_string(),
        event_window: state.contract.event_window(),
        writes_enabled: state.writer.is_some(),
    }))
}
