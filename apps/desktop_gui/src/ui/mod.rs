//! UI layer for desktop GUI: app shell, category cards, and small shared widgets.

pub mod app;
pub mod widgets;

pub use app::CategoryAdminApp;
