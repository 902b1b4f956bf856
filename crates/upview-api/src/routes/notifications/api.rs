//! Notifications API endpoints - JSON API

use crate::AppState;
use axum::Json;
use upview_core::Toast;

pub async fn api_notifications(state: axum::extract::State<AppState>) -> Json<Vec<Toast>> {
    Json(state.notifications.drain())
}
