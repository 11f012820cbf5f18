use actix_web::{HttpResponse, get, web};
use alloy_primitives::Address;

use super::error::ApiError;
use super::models::{AppState, BalanceResponse};
use crate::wallet::{format_native_balance, shorten_address};

#[get("/balance/{address}")]
pub async fn get_balance(
    state: web::Data<AppState>,
    path: web::Path<(String,)>,
) -> Result<HttpResponse, ApiError> {
    let raw = path.into_inner().0;
    let address: Address = raw
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("invalid address {raw:?}: {e}")))?;

    let wei = state
        .contract
        .balance_of(address)
        .await
        .map_err(ApiError::Read)?;

    Ok(HttpResponse::Ok().json(BalanceResponse {
        address: address.to_string(),
        short: shorten_address(&address),
        balance_wei: wei.to_string(),
        balance: format_native_balance(wei),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use alloy_primitives::{Address, U256};
    use serde_json::Value;

    use crate::api::init_routes;
    use crate::testing::{MockChain, app_state};

    #[actix_web::test]
    async fn reports_wei_and_formatted_balance() {
        let chain = MockChain::new();
        let account = Address::repeat_byte(0x11);
        chain.set_balance(account, U256::from(2_250_000_000_000_000_000u128));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(&chain, false)))
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/blockchain/balance/{account}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["balanceWei"], "2250000000000000000");
        assert_eq!(body["balance"], "2.2500");
        assert_eq!(body["short"], "0x1111...1111");
    }

    #[actix_web::test]
    async fn bad_address_is_400() {
        let chain = MockChain::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state(&chain, false)))
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/blockchain/balance/not-an-address")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
