//! HTTP page server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::accounts: Grouped account list
//! - routes::transactions: Detail pane for the selected account
//! - routes::notifications: Failure toasts
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use upview_config::Config;
use upview_core::{NotificationCenter, UpView};

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub view: Arc<UpView>,
    pub notifications: Arc<NotificationCenter>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{api_accounts, htmx_accounts_list};
    use routes::notifications::{api_notifications, htmx_notifications};
    use routes::settings::api_settings;
    use routes::transactions::{api_transactions, htmx_detail};

    let api = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/accounts", get(api_accounts))
        .route("/api/transactions", get(api_transactions))
        .route("/api/notifications", get(api_notifications))
        .route("/api/settings", get(api_settings))
        .layer(ServiceBuilder::new().layer(CorsLayer::new().allow_methods([axum::http::Method::GET])));

    Router::new()
        .merge(api)
        // HTMX page routes
        .route("/", get(index_page))
        // HTMX partial routes
        .route("/accounts/list", get(htmx_accounts_list))
        .route("/detail", get(htmx_detail))
        .route("/notifications", get(htmx_notifications))
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound {
        resource: uri.path().to_string(),
    }
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Up</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css">
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        upview_utils::escape_html(title),
        content
    )
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(title, inner_content)
    }
}

/// Account list on the left, detail pane on the right, toasts on top
async fn index_page(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let account_list = routes::accounts::render_accounts_list(&state.view);
    let detail = routes::transactions::render_detail(&state.view.detail());

    let inner_content = format!(
        r#"<div id='toasts' class='fixed top-4 right-4 z-50 w-80' hx-get='/notifications' hx-trigger='every 2s' hx-swap='beforeend'></div>
<div class='flex h-screen'>
    <aside class='w-96 flex-shrink-0 bg-white border-r overflow-auto'>
        <div class='flex items-center justify-between p-4 border-b'>
            <h1 class='text-xl font-bold text-indigo-600'>Accounts</h1>
            <button class='text-sm text-gray-500 hover:text-gray-700' hx-get='/detail' hx-target='#detail'>Clear</button>
        </div>
        {}
    </aside>
    <main class='flex-1 overflow-auto p-6'><div id='detail'>{}</div></main>
</div>"#,
        account_list, detail
    );

    axum::response::Html(page_response(&headers, "Accounts", &inner_content))
}

/// Serve the page until the listener fails
pub async fn start_server(config: Config, view: Arc<UpView>, notifications: Arc<NotificationCenter>) -> Result<(), ApiError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        view,
        notifications,
        config,
    };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await.map_err(|source| ApiError::Bind {
        addr: addr.clone(),
        source,
    })?;
    log::info!("Starting upview server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Accounts and transactions)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await.map_err(ApiError::Serve)?;
    log::info!("Server stopped gracefully");
    Ok(())
}
