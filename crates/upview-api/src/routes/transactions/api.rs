//! Transactions API endpoints - JSON API

use crate::AppState;
use axum::Json;
use serde::Serialize;
use upview_client::Transaction;
use upview_core::Presenter;

#[derive(Debug, Clone, Serialize)]
pub struct TransactionsResponse {
    pub loading: bool,
    pub transactions: Vec<Transaction>,
    /// Set only when the list is empty and nothing is loading
    pub empty_message: Option<String>,
}

pub async fn api_transactions(state: axum::extract::State<AppState>) -> Json<TransactionsResponse> {
    let snapshot = state.view.transactions().snapshot();
    let empty_message = Presenter::describe_empty_state(&snapshot.transactions, snapshot.loading).map(str::to_string);
    Json(TransactionsResponse {
        loading: snapshot.loading,
        transactions: snapshot.transactions,
        empty_message,
    })
}
