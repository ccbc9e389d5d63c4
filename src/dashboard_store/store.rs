//! SQLite-backed dashboard store.

use super::connection::{open_connection, parse_database_url, StoreError};
use super::models::{
    AnalyticsRows, AnalyticsTotalsRow, BalancePolicy, EarningsRow, NewPayout, PayoutCreation,
    PayoutRow, PlatformRow, ReleaseRow, StreamsByKey, AGE_GROUPS,
};
use super::schema::latest_schema;
use super::trait_def::DashboardStore;
use crate::server::metrics;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, TransactionBehavior};
use std::time::Instant;
use tracing::{debug, info};

/// Number of entries in the top platforms / top countries lists.
pub const TOP_ENTRIES_LIMIT: usize = 5;

/// Number of payouts returned by the payout history.
pub const PAYOUT_HISTORY_LIMIT: usize = 10;

/// Dashboard store that opens one connection per operation.
///
/// The database URL is kept as configured; a missing URL is only reported
/// when an operation tries to connect.
#[derive(Clone, Debug)]
pub struct SqliteDashboardStore {
    database_url: Option<String>,
}

impl SqliteDashboardStore {
    pub fn new(database_url: Option<String>) -> Self {
        Self { database_url }
    }

    fn target(&self) -> Result<String> {
        let url = self
            .database_url
            .as_deref()
            .ok_or(StoreError::MissingDatabaseUrl)?;
        Ok(parse_database_url(url)?)
    }

    /// Runs `operation` on a freshly opened connection. The connection is
    /// closed when this returns, whether `operation` succeeded or not.
    fn with_connection<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut Connection) -> Result<T>,
    ) -> Result<T> {
        let start = Instant::now();
        let target = self.target()?;
        let mut conn = open_connection(&target, false)
            .map_err(|err| {
                metrics::record_db_connection_error();
                err
            })
            .with_context(|| format!("Failed to open dashboard database {}", target))?;

        let result = f(&mut conn);
        drop(conn);

        let elapsed = start.elapsed();
        metrics::record_db_query(operation, elapsed);
        debug!("{} finished in {}ms", operation, elapsed.as_millis());
        result
    }

    /// Creates the dashboard tables when the database has none.
    /// Returns whether the schema was created.
    pub fn bootstrap_schema(&self) -> Result<bool> {
        let target = self.target()?;
        let conn = open_connection(&target, true)
            .with_context(|| format!("Failed to open dashboard database {}", target))?;

        let schema = latest_schema();
        let created = schema.create_if_empty(&conn)?;
        if created {
            info!(
                "Created dashboard schema version {} ({})",
                schema.version,
                schema.table_names().join(", ")
            );
        } else {
            info!("Dashboard database already has tables, skipping schema bootstrap");
        }
        Ok(created)
    }
}

fn query_earnings(conn: &Connection, user_id: i64) -> Result<EarningsRow> {
    let total_earnings: Option<f64> = conn.query_row(
        "SELECT SUM(a.revenue)
         FROM analytics a
         JOIN releases r ON a.release_id = r.id
         WHERE r.user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    let total_paid: Option<f64> = conn.query_row(
        "SELECT SUM(amount) FROM payouts WHERE user_id = ?1 AND status = 'completed'",
        params![user_id],
        |row| row.get(0),
    )?;
    Ok(EarningsRow {
        total_earnings,
        total_paid,
    })
}

fn query_streams_by_key(conn: &Connection, sql: &str, user_id: i64) -> Result<Vec<StreamsByKey>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt
        .query_map(params![user_id], |row| {
            Ok(StreamsByKey {
                key: row.get(0)?,
                streams: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Orders the known age buckets first, in their fixed order; anything else
/// sorts after them by name.
fn demographics_query() -> String {
    let cases: String = AGE_GROUPS
        .iter()
        .enumerate()
        .map(|(position, group)| format!(" WHEN '{}' THEN {}", group, position + 1))
        .collect();
    format!(
        "SELECT a.age_group, SUM(a.streams) AS streams
         FROM analytics a
         JOIN releases r ON a.release_id = r.id
         WHERE r.user_id = ?1 AND a.age_group IS NOT NULL
         GROUP BY a.age_group
         ORDER BY CASE a.age_group{} ELSE {} END, a.age_group",
        cases,
        AGE_GROUPS.len() + 1
    )
}

impl DashboardStore for SqliteDashboardStore {
    fn list_releases(&self, user_id: i64) -> Result<Vec<ReleaseRow>> {
        self.with_connection("list_releases", |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT r.id, r.title, r.artist, r.status, r.cover_url,
                        COUNT(rp.id) AS platforms_count,
                        AVG(rp.progress) AS avg_progress,
                        r.created_at
                 FROM releases r
                 LEFT JOIN release_platforms rp ON r.id = rp.release_id
                 WHERE r.user_id = ?1
                 GROUP BY r.id
                 ORDER BY r.created_at DESC, r.id DESC",
            )?;
            let releases = stmt
                .query_map(params![user_id], |row| {
                    Ok(ReleaseRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        artist: row.get(2)?,
                        status: row.get(3)?,
                        cover_url: row.get(4)?,
                        platforms_count: row.get(5)?,
                        avg_progress: row.get(6)?,
                        created_at: row.get(7)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(releases)
        })
    }

    fn get_analytics(&self, user_id: i64) -> Result<AnalyticsRows> {
        self.with_connection("get_analytics", |conn| {
            let totals = conn.query_row(
                "SELECT SUM(a.streams), SUM(a.listeners), SUM(a.revenue), COUNT(DISTINCT r.id)
                 FROM analytics a
                 JOIN releases r ON a.release_id = r.id
                 WHERE r.user_id = ?1",
                params![user_id],
                |row| {
                    Ok(AnalyticsTotalsRow {
                        total_streams: row.get(0)?,
                        total_listeners: row.get(1)?,
                        total_revenue: row.get(2)?,
                        total_releases: row.get(3)?,
                    })
                },
            )?;

            let platforms = query_streams_by_key(
                conn,
                &format!(
                    "SELECT p.name, SUM(a.streams) AS streams
                     FROM analytics a
                     JOIN platforms p ON a.platform_id = p.id
                     JOIN releases r ON a.release_id = r.id
                     WHERE r.user_id = ?1
                     GROUP BY p.name
                     ORDER BY streams DESC, p.name
                     LIMIT {}",
                    TOP_ENTRIES_LIMIT
                ),
                user_id,
            )?;

            let countries = query_streams_by_key(
                conn,
                &format!(
                    "SELECT a.country, SUM(a.streams) AS streams
                     FROM analytics a
                     JOIN releases r ON a.release_id = r.id
                     WHERE r.user_id = ?1 AND a.country IS NOT NULL
                     GROUP BY a.country
                     ORDER BY streams DESC, a.country
                     LIMIT {}",
                    TOP_ENTRIES_LIMIT
                ),
                user_id,
            )?;

            let demographics = query_streams_by_key(conn, &demographics_query(), user_id)?;

            Ok(AnalyticsRows {
                totals,
                platforms,
                countries,
                demographics,
            })
        })
    }

    fn get_earnings(&self, user_id: i64) -> Result<EarningsRow> {
        self.with_connection("get_earnings", |conn| query_earnings(conn, user_id))
    }

    fn list_payouts(&self, user_id: i64) -> Result<Vec<PayoutRow>> {
        self.with_connection("list_payouts", |conn| {
            let mut stmt = conn.prepare_cached(&format!(
                "SELECT id, amount, method, status, requested_at, processed_at
                 FROM payouts
                 WHERE user_id = ?1
                 ORDER BY requested_at DESC, id DESC
                 LIMIT {}",
                PAYOUT_HISTORY_LIMIT
            ))?;
            let payouts = stmt
                .query_map(params![user_id], |row| {
                    Ok(PayoutRow {
                        id: row.get(0)?,
                        amount: row.get(1)?,
                        method: row.get(2)?,
                        status: row.get(3)?,
                        requested_at: row.get(4)?,
                        processed_at: row.get(5)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(payouts)
        })
    }

    fn create_payout(&self, payout: &NewPayout, policy: BalancePolicy) -> Result<PayoutCreation> {
        self.with_connection("create_payout", |conn| {
            // The write lock is held from the balance read through the insert.
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            if policy == BalancePolicy::RequireAvailable {
                let earnings = query_earnings(&tx, payout.user_id)?;
                let available =
                    earnings.total_earnings.unwrap_or(0.0) - earnings.total_paid.unwrap_or(0.0);
                if payout.amount > available {
                    return Ok(PayoutCreation::InsufficientBalance { available });
                }
            }

            tx.execute(
                "INSERT INTO payouts (user_id, amount, method, details, status)
                 VALUES (?1, ?2, ?3, ?4, 'pending')",
                params![payout.user_id, payout.amount, payout.method, payout.details],
            )
            .with_context(|| format!("Failed to create payout for user {}", payout.user_id))?;
            let id = tx.last_insert_rowid();
            tx.commit()?;

            metrics::record_payout_created();
            Ok(PayoutCreation::Created { id })
        })
    }

    fn list_active_platforms(&self) -> Result<Vec<PlatformRow>> {
        self.with_connection("list_active_platforms", |conn| {
            let mut stmt = conn
                .prepare_cached("SELECT id, name FROM platforms WHERE is_active = 1 ORDER BY name")?;
            let platforms = stmt
                .query_map([], |row| {
                    Ok(PlatformRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(platforms)
        })
    }
}
