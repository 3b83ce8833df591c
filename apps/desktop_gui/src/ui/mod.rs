//! UI layer for the desktop GUI: app shell, entry form, and result dashboard.

pub mod app;
pub mod dashboard;
pub mod entry_form;

pub use app::AdvisorApp;
