//! Row models returned by the dashboard store.
//!
//! Aggregates are kept as `Option` exactly as SQL returns them (`SUM` over no
//! rows is NULL); coalescing happens when rows are projected into payloads.

/// The fixed demographic buckets, in display order.
pub const AGE_GROUPS: [&str; 4] = ["18-24", "25-34", "35-44", "45+"];

#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRow {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub status: String,
    pub cover_url: Option<String>,
    pub platforms_count: Option<i64>,
    pub avg_progress: Option<f64>,
    /// Unix seconds.
    pub created_at: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsTotalsRow {
    pub total_streams: Option<i64>,
    pub total_listeners: Option<i64>,
    pub total_revenue: Option<f64>,
    pub total_releases: Option<i64>,
}

/// Streams summed under one grouping key (platform name, country, age group).
#[derive(Debug, Clone, PartialEq)]
pub struct StreamsByKey {
    pub key: String,
    pub streams: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsRows {
    pub totals: AnalyticsTotalsRow,
    pub platforms: Vec<StreamsByKey>,
    pub countries: Vec<StreamsByKey>,
    pub demographics: Vec<StreamsByKey>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EarningsRow {
    pub total_earnings: Option<f64>,
    pub total_paid: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PayoutRow {
    pub id: i64,
    pub amount: f64,
    pub method: String,
    pub status: String,
    pub requested_at: Option<i64>,
    pub processed_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformRow {
    pub id: i64,
    pub name: String,
}

/// A payout request about to be inserted with status "pending".
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayout {
    pub user_id: i64,
    pub amount: f64,
    pub method: String,
    pub details: Option<String>,
}

/// Whether payout creation checks the user's available balance first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BalancePolicy {
    #[default]
    Unchecked,
    RequireAvailable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PayoutCreation {
    Created { id: i64 },
    InsufficientBalance { available: f64 },
}
