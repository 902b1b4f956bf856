//! Account routes - grouped account list
//!
//! - api.rs: JSON snapshot of the loader
//! - page.rs: HTMX partial with one section per account type

pub mod api;
pub mod page;

pub use api::api_accounts;
pub use page::{htmx_accounts_list, render_accounts_list};
