//! DashboardStore trait definition.

use super::models::{
    AnalyticsRows, BalancePolicy, EarningsRow, NewPayout, PayoutCreation, PayoutRow, PlatformRow,
    ReleaseRow,
};
use anyhow::Result;

/// Read/write access to the distribution dashboard tables.
///
/// Every call is a self-contained unit of work: implementations acquire
/// their connection inside the call and release it before returning.
pub trait DashboardStore: Send + Sync {
    /// Releases owned by `user_id`, newest first, with platform count and
    /// average platform progress.
    fn list_releases(&self, user_id: i64) -> Result<Vec<ReleaseRow>>;

    /// Totals, top platforms, top countries and demographics for the
    /// releases owned by `user_id`.
    fn get_analytics(&self, user_id: i64) -> Result<AnalyticsRows>;

    /// Revenue earned and completed payouts for `user_id`.
    fn get_earnings(&self, user_id: i64) -> Result<EarningsRow>;

    /// The most recent payouts requested by `user_id`.
    fn list_payouts(&self, user_id: i64) -> Result<Vec<PayoutRow>>;

    /// Inserts a pending payout and commits.
    fn create_payout(&self, payout: &NewPayout, policy: BalancePolicy) -> Result<PayoutCreation>;

    /// Active platforms sorted by name.
    fn list_active_platforms(&self) -> Result<Vec<PlatformRow>>;
}
