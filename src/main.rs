mod api;
mod config;
mod contract;
mod error;
mod notify;
mod rpc;
mod wallet;

#[cfg(test)]
mod testing;

use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::{info, warn};

use api::AppState;
use config::Config;
use contract::ContractClient;
use rpc::{HttpTransport, JsonRpcTransport};
use wallet::{RpcSigner, WriteSubmitter};

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = Config::from_env().map_err(io::Error::other)?;
    let transport: Arc<dyn JsonRpcTransport> = Arc::new(
        HttpTransport::new(config.rpc_url.clone(), config.rpc_timeout).map_err(io::Error::other)?,
    );
    info!(
        "RPC {} (chain {:#x}, timeout {:?})",
        config.rpc_url, config.chain_id, config.rpc_timeout
    );

    let contract = ContractClient::new(
        transport.clone(),
        config.contract_address,
        config.event_window,
    );
    let writer = config.signer_address.map(|from| {
        info!("writes enabled, signing as {from}");
        WriteSubmitter::new(
            contract.clone(),
            Arc::new(RpcSigner::new(transport.clone(), from)),
            config.chain_id,
            config.confirmation_timeout,
        )
    });
    if writer.is_none() {
        warn!("SIGNER_ADDRESS not set, POST /blockchain/value is disabled");
    }

    let host = config.host.clone();
    let port = config.port;
    println!(
        "⛓️ Starting SimpleStorage proxy at http://{host}:{port} (contract {})",
        config.contract_address
    );

    let state = web::Data::new(AppState::new(config, contract, writer));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
