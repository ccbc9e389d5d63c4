//! Request routing and projection for the distribution dashboard.

mod cors;
mod error;
mod event;
mod handler;
mod payload;
mod principal;
mod projection;
mod route;

pub use error::{DashboardError, INTERNAL_ERROR_MESSAGE};
pub use event::{DashboardEvent, DashboardResponse, HttpMethod};
pub use handler::{DashboardHandler, HandlerSettings};
pub use principal::{Principal, USER_ID_HEADER};
pub use route::{resolve, Action, Route};
