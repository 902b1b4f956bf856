//! Accounts page rendering - HTMX partial

use crate::AppState;
use upview_core::{ListSection, UpView};
use upview_utils::escape_html;

/// Re-polled by HTMX until the initial load has finished
pub async fn htmx_accounts_list(state: axum::extract::State<AppState>) -> axum::response::Html<String> {
    axum::response::Html(render_accounts_list(&state.view))
}

pub fn render_accounts_list(view: &UpView) -> String {
    if view.accounts().is_pending() {
        return r#"<div id='account-list' hx-get='/accounts/list' hx-trigger='every 1s' hx-swap='outerHTML'>
    <p class='text-sm text-gray-500 p-4'>Loading accounts...</p>
</div>"#
            .to_string();
    }

    let sections: String = view.sections().iter().map(render_section).collect();
    format!(
        r#"<div id='account-list' class='divide-y'>{}</div>"#,
        sections
    )
}

fn render_section(section: &ListSection) -> String {
    let items: String = section
        .items
        .iter()
        .map(|item| {
            format!(
                r#"<li class='flex justify-between px-4 py-2 cursor-pointer hover:bg-indigo-50' hx-get='/detail?account={}' hx-target='#detail' hx-swap='innerHTML'><span>{}</span><span class='font-medium'>{}</span></li>"#,
                urlencoding::encode(&item.key),
                escape_html(&item.title),
                escape_html(&item.accessory)
            )
        })
        .collect();

    format!(
        r#"<section class='py-2'><h3 class='px-4 text-xs font-semibold uppercase text-gray-500'>{}</h3><ul>{}</ul></section>"#,
        escape_html(&section.title),
        items
    )
}
