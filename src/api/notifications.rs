use actix_web::{HttpResponse, delete, get, web};
use chrono::Utc;
use uuid::Uuid;

use super::error::ApiError;
use super::models::AppState;

/// Notifications that have not expired yet, oldest first.
#[get("/notifications")]
pub async fn list_notifications(state: web::Data<AppState>) -> HttpResponse {
    let mut center = state.notifications.lock().expect("mutex poisoned");
    center.expire(Utc::now());
    HttpResponse::Ok().json(center.active())
}

#[delete("/notifications/{id}")]
pub async fn dismiss_notification(
    state: web::Data<AppState>,
    path: web::Path<(Uuid,)>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner().0;
    let mut center = state.notifications.lock().expect("mutex poisoned");
    if center.dismiss(id) {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(ApiError::NotFound(format!("notification {id} not found")))
    }
}
