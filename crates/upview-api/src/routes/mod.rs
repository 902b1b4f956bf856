//! Route modules for the page server
//!
//! - accounts: grouped account list
//! - transactions: detail pane for the selected account
//! - notifications: pending toasts
//! - settings: effective configuration
//!
//! Each module keeps JSON endpoints in api.rs and HTMX partials in page.rs.

pub mod accounts;
pub mod notifications;
pub mod settings;
pub mod transactions;
