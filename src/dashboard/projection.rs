//! Wire payloads built from store rows.
//!
//! SQL aggregates over no rows come back as NULL; every numeric field that
//! can be NULL is coalesced to zero here, never in the store.

use crate::dashboard_store::{
    AnalyticsRows, EarningsRow, PayoutRow, PlatformRow, ReleaseRow, StreamsByKey,
};
use chrono::{DateTime, SecondsFormat};
use serde::Serialize;

pub trait ZeroIfAbsent {
    type Output;
    fn zero_if_absent(self) -> Self::Output;
}

impl ZeroIfAbsent for Option<i64> {
    type Output = i64;
    fn zero_if_absent(self) -> i64 {
        self.unwrap_or(0)
    }
}

impl ZeroIfAbsent for Option<f64> {
    type Output = f64;
    fn zero_if_absent(self) -> f64 {
        self.unwrap_or(0.0)
    }
}

/// Unix seconds to `2024-05-01T10:00:00Z`.
pub fn iso_timestamp(secs: Option<i64>) -> Option<String> {
    secs.and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ReleasePayload {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub status: String,
    pub cover_url: Option<String>,
    pub platforms_count: i64,
    pub progress: i64,
    pub created_at: Option<String>,
}

impl From<ReleaseRow> for ReleasePayload {
    fn from(row: ReleaseRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            artist: row.artist,
            status: row.status,
            cover_url: row.cover_url,
            platforms_count: row.platforms_count.zero_if_absent(),
            // Truncates toward zero.
            progress: row.avg_progress.zero_if_absent() as i64,
            created_at: iso_timestamp(row.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReleasesPayload {
    pub releases: Vec<ReleasePayload>,
}

impl From<Vec<ReleaseRow>> for ReleasesPayload {
    fn from(rows: Vec<ReleaseRow>) -> Self {
        Self {
            releases: rows.into_iter().map(ReleasePayload::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct TotalsPayload {
    pub streams: i64,
    pub listeners: i64,
    pub revenue: f64,
    pub releases: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PlatformStreams {
    pub name: String,
    pub streams: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CountryStreams {
    pub country: String,
    pub streams: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DemographicStreams {
    pub age_group: String,
    pub streams: i64,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsPayload {
    pub totals: TotalsPayload,
    pub platforms: Vec<PlatformStreams>,
    pub countries: Vec<CountryStreams>,
    pub demographics: Vec<DemographicStreams>,
}

fn project<T>(rows: Vec<StreamsByKey>, f: impl Fn(String, i64) -> T) -> Vec<T> {
    rows.into_iter().map(|row| f(row.key, row.streams)).collect()
}

impl From<AnalyticsRows> for AnalyticsPayload {
    fn from(rows: AnalyticsRows) -> Self {
        let totals = rows.totals;
        Self {
            totals: TotalsPayload {
                streams: totals.total_streams.zero_if_absent(),
                listeners: totals.total_listeners.zero_if_absent(),
                revenue: totals.total_revenue.zero_if_absent(),
                releases: totals.total_releases.zero_if_absent(),
            },
            platforms: project(rows.platforms, |name, streams| PlatformStreams { name, streams }),
            countries: project(rows.countries, |country, streams| CountryStreams {
                country,
                streams,
            }),
            demographics: project(rows.demographics, |age_group, streams| {
                DemographicStreams { age_group, streams }
            }),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct EarningsPayload {
    pub total_earnings: f64,
    pub total_paid: f64,
    pub available: f64,
}

impl From<EarningsRow> for EarningsPayload {
    fn from(row: EarningsRow) -> Self {
        let total_earnings = row.total_earnings.zero_if_absent();
        let total_paid = row.total_paid.zero_if_absent();
        Self {
            total_earnings,
            total_paid,
            available: total_earnings - total_paid,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct PayoutPayload {
    pub id: i64,
    pub amount: f64,
    pub method: String,
    pub status: String,
    pub requested_at: Option<String>,
    pub processed_at: Option<String>,
}

impl From<PayoutRow> for PayoutPayload {
    fn from(row: PayoutRow) -> Self {
        Self {
            id: row.id,
            amount: row.amount,
            method: row.method,
            status: row.status,
            requested_at: iso_timestamp(row.requested_at),
            processed_at: iso_timestamp(row.processed_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PayoutsPayload {
    pub payouts: Vec<PayoutPayload>,
}

impl From<Vec<PayoutRow>> for PayoutsPayload {
    fn from(rows: Vec<PayoutRow>) -> Self {
        Self {
            payouts: rows.into_iter().map(PayoutPayload::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CreatedPayoutPayload {
    pub id: i64,
    pub status: &'static str,
}

impl CreatedPayoutPayload {
    pub fn pending(id: i64) -> Self {
        Self {
            id,
            status: "pending",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlatformPayload {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct PlatformsPayload {
    pub platforms: Vec<PlatformPayload>,
}

impl From<Vec<PlatformRow>> for PlatformsPayload {
    fn from(rows: Vec<PlatformRow>) -> Self {
        Self {
            platforms: rows
                .into_iter()
                .map(|row| PlatformPayload {
                    id: row.id,
                    name: row.name,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload<'a> {
    pub error: &'a str,
}
