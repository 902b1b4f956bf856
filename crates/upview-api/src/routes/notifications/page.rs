//! Toast area rendering - HTMX partial

use crate::AppState;
use upview_core::{Toast, ToastStyle};
use upview_utils::escape_html;

pub async fn htmx_notifications(state: axum::extract::State<AppState>) -> axum::response::Html<String> {
    axum::response::Html(render_toasts(&state.notifications.drain()))
}

pub fn render_toasts(toasts: &[Toast]) -> String {
    toasts
        .iter()
        .map(|toast| {
            let class = match toast.style {
                ToastStyle::Failure => "bg-red-50 border-red-200 text-red-700",
            };
            format!(
                "<div class='mb-2 px-4 py-2 rounded-lg border shadow-sm {}' role='alert'>{}</div>",
                class,
                escape_html(&toast.title)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_toasts_as_failure_alerts() {
        let html = render_toasts(&[Toast::failure("Failed <to> get")]);
        assert!(html.contains("bg-red-50"));
        assert!(html.contains("role='alert'"));
        assert!(html.contains("Failed &lt;to&gt; get"));
        assert!(render_toasts(&[]).is_empty());
    }
}
