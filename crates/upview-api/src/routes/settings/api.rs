//! Settings API endpoints - JSON API

use crate::AppState;
use axum::Json;

/// Effective configuration. The token itself is never serialized.
pub async fn api_settings(state: axum::extract::State<AppState>) -> Json<serde_json::Value> {
    let config = &state.config;
    let mut value = serde_json::to_value(config).unwrap_or_default();
    if let Some(up) = value.get_mut("up").and_then(|v| v.as_object_mut()) {
        up.insert("token_set".to_string(), serde_json::Value::Bool(!config.up.token.is_empty()));
    }
    Json(value)
}
