//! Transaction routes - detail pane for the selected account

pub mod api;
pub mod page;

pub use api::{api_transactions, TransactionsResponse};
pub use page::{htmx_detail, render_detail};
