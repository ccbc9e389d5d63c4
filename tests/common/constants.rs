//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When fixture data changes, update only this file and fixtures.rs.
#![allow(dead_code)]

// ============================================================================
// Test Users
// ============================================================================

/// Artist with releases, analytics and payouts
pub const ARTIST_USER_ID: i64 = 1;

/// Another artist, whose data must never leak into ARTIST_USER_ID responses
pub const OTHER_USER_ID: i64 = 2;

/// Authenticated user without any data
pub const EMPTY_USER_ID: i64 = 3;

// ============================================================================
// Test Releases (ARTIST_USER_ID)
// ============================================================================

/// Released on Spotify (100%) and Apple Music (50%)
pub const RELEASE_1_TITLE: &str = "First Single";
pub const RELEASE_1_CREATED_AT: &str = "2024-05-01T10:00:00Z";

/// Released on Spotify (33%), Apple Music (33%) and Deezer (34%)
pub const RELEASE_2_TITLE: &str = "Second Album";
pub const RELEASE_2_CREATED_AT: &str = "2024-06-01T10:00:00Z";

/// No platform rows, no analytics
pub const RELEASE_3_TITLE: &str = "Unreleased Demo";
pub const RELEASE_3_CREATED_AT: &str = "2024-07-01T10:00:00Z";

/// Owned by OTHER_USER_ID
pub const OTHER_RELEASE_TITLE: &str = "Other Artist Hit";

pub const ARTIST_NAME: &str = "The Test Band";

// ============================================================================
// Test Analytics (ARTIST_USER_ID)
// ============================================================================

pub const TOTAL_STREAMS: i64 = 2000;
pub const TOTAL_LISTENERS: i64 = 780;
pub const TOTAL_REVENUE: f64 = 85.0;

/// Releases with at least one analytics row
pub const RELEASES_WITH_ANALYTICS: i64 = 2;

// ============================================================================
// Test Payouts (ARTIST_USER_ID)
// ============================================================================

/// Sum of completed payouts
pub const TOTAL_PAID: f64 = 30.0;

/// TOTAL_REVENUE - TOTAL_PAID
pub const AVAILABLE_BALANCE: f64 = 55.0;

pub const COMPLETED_PAYOUT_REQUESTED_AT: &str = "2024-05-06T12:53:20Z";
pub const COMPLETED_PAYOUT_PROCESSED_AT: &str = "2024-05-07T16:40:00Z";

pub const FIXTURE_PAYOUTS_COUNT: usize = 3;

// ============================================================================
// Test Platforms
// ============================================================================

/// Active platforms, sorted by name
pub const ACTIVE_PLATFORMS: [&str; 3] = ["Apple Music", "Deezer", "Spotify"];

pub const INACTIVE_PLATFORM: &str = "Napster";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
