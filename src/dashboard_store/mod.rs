mod connection;
mod models;
mod schema;
mod store;
mod trait_def;

pub use connection::{parse_database_url, StoreError};
pub use models::*;
pub use schema::latest_schema;
pub use store::{SqliteDashboardStore, PAYOUT_HISTORY_LIMIT, TOP_ENTRIES_LIMIT};
pub use trait_def::DashboardStore;
