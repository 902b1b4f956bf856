//! Detail pane rendering - HTMX partial

use crate::{ApiError, AppState};
use axum::extract::Query;
use std::collections::HashMap;
use upview_core::DetailPane;
use upview_utils::escape_html;

/// Up resource ids are UUIDs; anything much longer is not an account id
const MAX_ACCOUNT_ID_LEN: usize = 128;

/// Select the account named by `?account=` and render its transactions.
///
/// A missing or unknown id deselects. Fetch failures still render the pane;
/// the failure reaches the user through the notification area.
pub async fn htmx_detail(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<axum::response::Html<String>, ApiError> {
    let account = params.get("account").map(|s| s.trim()).filter(|s| !s.is_empty());
    if let Some(id) = account {
        if id.len() > MAX_ACCOUNT_ID_LEN {
            return Err(ApiError::BadRequest {
                message: format!("account id longer than {} characters", MAX_ACCOUNT_ID_LEN),
            });
        }
    }

    match state.view.select_account(account).await {
        Ok(outcome) => log::debug!("selection {:?} -> {:?}", account, outcome),
        Err(err) => log::debug!("selection {:?} failed: {}", account, err),
    }

    Ok(axum::response::Html(render_detail(&state.view.detail())))
}

pub fn render_detail(pane: &DetailPane) -> String {
    if pane.loading {
        return "<p class='text-sm text-gray-500'>Loading transactions...</p>".to_string();
    }

    if let Some(message) = &pane.markdown {
        return format!("<p class='text-gray-500'>{}</p>", escape_html(message));
    }

    let rows: String = pane
        .entries
        .iter()
        .map(|entry| {
            format!(
                "<div class='flex justify-between py-2 border-b'><dt>{}</dt><dd class='font-medium'>{}</dd></div>",
                escape_html(&entry.title),
                escape_html(&entry.text)
            )
        })
        .collect();
    format!("<dl>{}</dl>", rows)
}
