//! Release Dashboard Server Library
//!
//! This library exposes the internal modules for the binary and the
//! end-to-end tests.

pub mod config;
pub mod dashboard;
pub mod dashboard_store;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use dashboard::{DashboardEvent, DashboardHandler, DashboardResponse, HandlerSettings};
pub use dashboard_store::{DashboardStore, SqliteDashboardStore};
pub use server::{run_server, RequestsLoggingLevel};
