mod balance;
pub mod error;
mod events;
mod health;
pub mod models;
mod notifications;
mod status;
mod value;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(health::health_check)
        .service(notifications::list_notifications)
        .service(notifications::dismiss_notification)
        .service(
            web::scope("/blockchain")
                .service(value::get_value)
                .service(value::post_value)
                .service(events::post_events)
                .service(balance::get_balance)
                .service(status::get_status),
        );
}
