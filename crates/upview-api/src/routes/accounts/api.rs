//! Accounts API endpoints - JSON API

use crate::AppState;
use axum::Json;
use upview_core::AccountsSnapshot;

/// `{loading, groups}` where `groups` maps account type to accounts in first-seen order
pub async fn api_accounts(state: axum::extract::State<AppState>) -> Json<AccountsSnapshot> {
    Json(state.view.accounts().snapshot())
}
