//! SQLite schema for the distribution dashboard tables.
//!
//! Production databases are provisioned by an external migration process;
//! this definition is used to bootstrap empty development and test databases
//! with the columns the dashboard queries rely on.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP,
};

const PLATFORMS_TABLE: Table = Table {
    name: "platforms",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!(
            "is_active",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("1")
        ),
    ],
    indices: &[],
};

const RELEASES_TABLE: Table = Table {
    name: "releases",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("user_id", &SqlType::Integer, non_null = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("artist", &SqlType::Text, non_null = true),
        sqlite_column!(
            "status",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'draft'")
        ),
        sqlite_column!("cover_url", &SqlType::Text),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_releases_user_id", "user_id")],
};

const RELEASE_PLATFORMS_TABLE: Table = Table {
    name: "release_platforms",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "release_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "releases",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!(
            "platform_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "platforms",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Restrict,
            })
        ),
        // Percentage, 0-100
        sqlite_column!(
            "progress",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
    ],
    indices: &[("idx_release_platforms_release_id", "release_id")],
};

const ANALYTICS_TABLE: Table = Table {
    name: "analytics",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "release_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "releases",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Cascade,
            })
        ),
        sqlite_column!(
            "platform_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ForeignKey {
                foreign_table: "platforms",
                foreign_column: "id",
                on_delete: ForeignKeyOnChange::Restrict,
            })
        ),
        sqlite_column!(
            "streams",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "listeners",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!(
            "revenue",
            &SqlType::Real,
            non_null = true,
            default_value = Some("0")
        ),
        sqlite_column!("country", &SqlType::Text),
        sqlite_column!("age_group", &SqlType::Text),
        sqlite_column!(
            "recorded_at",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[
        ("idx_analytics_release_id", "release_id"),
        ("idx_analytics_platform_id", "platform_id"),
    ],
};

const PAYOUTS_TABLE: Table = Table {
    name: "payouts",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("user_id", &SqlType::Integer, non_null = true),
        sqlite_column!("amount", &SqlType::Real, non_null = true),
        sqlite_column!("method", &SqlType::Text, non_null = true),
        // Opaque, usually JSON
        sqlite_column!("details", &SqlType::Text),
        sqlite_column!(
            "status",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'pending'")
        ),
        sqlite_column!(
            "requested_at",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
        sqlite_column!("processed_at", &SqlType::Integer),
    ],
    indices: &[("idx_payouts_user_id", "user_id")],
};

pub const DASHBOARD_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        PLATFORMS_TABLE,
        RELEASES_TABLE,
        RELEASE_PLATFORMS_TABLE,
        ANALYTICS_TABLE,
        PAYOUTS_TABLE,
    ],
}];

pub fn latest_schema() -> &'static VersionedSchema {
    &DASHBOARD_VERSIONED_SCHEMAS[DASHBOARD_VERSIONED_SCHEMAS.len() - 1]
}
