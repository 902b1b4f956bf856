//! Settings routes - configuration display

pub mod api;

pub use api::api_settings;
