//! Notification routes - pending toasts, drained on read

pub mod api;
pub mod page;

pub use api::api_notifications;
pub use page::{htmx_notifications, render_toasts};
