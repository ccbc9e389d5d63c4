//! Test fixture creation for the dashboard database
//!
//! The schema is bootstrapped through the store, the rows are inserted with
//! direct SQL since the dashboard itself only ever writes payouts.

use super::constants::*;
use anyhow::Result;
use release_dashboard_server::SqliteDashboardStore;
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary dashboard database with two artists' data.
/// Returns (temp_dir, db_path)
pub fn create_test_db() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("dashboard.db");

    let store = SqliteDashboardStore::new(Some(db_path.to_string_lossy().to_string()));
    store.bootstrap_schema()?;

    let conn = Connection::open(&db_path)?;
    insert_platforms(&conn)?;
    insert_releases(&conn)?;
    insert_analytics(&conn)?;
    insert_payouts(&conn)?;

    Ok((dir, db_path))
}

fn insert_platforms(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "INSERT INTO platforms (id, name, is_active) VALUES
            (1, 'Spotify', 1),
            (2, 'Apple Music', 1),
            (3, 'Deezer', 1),
            (4, 'Napster', 0);",
    )?;
    Ok(())
}

fn insert_releases(conn: &Connection) -> Result<()> {
    let releases = [
        (1, ARTIST_USER_ID, RELEASE_1_TITLE, "published", 1_714_557_600),
        (2, ARTIST_USER_ID, RELEASE_2_TITLE, "published", 1_717_236_000),
        (3, ARTIST_USER_ID, RELEASE_3_TITLE, "draft", 1_719_828_000),
        (4, OTHER_USER_ID, OTHER_RELEASE_TITLE, "published", 1_720_000_000),
    ];
    for (id, user_id, title, status, created_at) in releases {
        conn.execute(
            "INSERT INTO releases (id, user_id, title, artist, status, cover_url, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                user_id,
                title,
                ARTIST_NAME,
                status,
                format!("https://cdn.example.com/covers/{}.jpg", id),
                created_at
            ],
        )?;
    }

    // (release_id, platform_id, progress)
    let progress = [(1, 1, 100), (1, 2, 50), (2, 1, 33), (2, 2, 33), (2, 3, 34), (4, 1, 100)];
    for (release_id, platform_id, progress) in progress {
        conn.execute(
            "INSERT INTO release_platforms (release_id, platform_id, progress) VALUES (?1, ?2, ?3)",
            params![release_id, platform_id, progress],
        )?;
    }
    Ok(())
}

fn insert_analytics(conn: &Connection) -> Result<()> {
    // (release_id, platform_id, streams, listeners, revenue, country, age_group)
    let rows: [(i64, i64, i64, i64, f64, Option<&str>, Option<&str>); 5] = [
        (1, 1, 1000, 400, 40.0, Some("US"), Some("18-24")),
        (1, 2, 500, 200, 25.0, Some("GB"), Some("25-34")),
        (2, 1, 300, 100, 12.0, Some("US"), Some("45+")),
        (2, 3, 200, 80, 8.0, None, None),
        (4, 1, 9999, 5000, 500.0, Some("FR"), Some("35-44")),
    ];
    for (release_id, platform_id, streams, listeners, revenue, country, age_group) in rows {
        conn.execute(
            "INSERT INTO analytics
                (release_id, platform_id, streams, listeners, revenue, country, age_group)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![release_id, platform_id, streams, listeners, revenue, country, age_group],
        )?;
    }
    Ok(())
}

fn insert_payouts(conn: &Connection) -> Result<()> {
    // (user_id, amount, method, status, requested_at, processed_at)
    let rows: [(i64, f64, &str, &str, i64, Option<i64>); 4] = [
        (ARTIST_USER_ID, 30.0, "bank", "completed", 1_715_000_000, Some(1_715_100_000)),
        (ARTIST_USER_ID, 10.0, "paypal", "pending", 1_716_000_000, None),
        (ARTIST_USER_ID, 5.0, "paypal", "failed", 1_716_500_000, None),
        (OTHER_USER_ID, 100.0, "bank", "completed", 1_716_600_000, Some(1_716_700_000)),
    ];
    for (user_id, amount, method, status, requested_at, processed_at) in rows {
        conn.execute(
            "INSERT INTO payouts (user_id, amount, method, status, requested_at, processed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![user_id, amount, method, status, requested_at, processed_at],
        )?;
    }
    Ok(())
}
