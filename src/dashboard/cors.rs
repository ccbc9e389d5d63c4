use super::principal::USER_ID_HEADER;
use std::collections::BTreeMap;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const MAX_AGE_SECS: u32 = 86_400;

pub fn allow_headers() -> String {
    format!("Content-Type, {}", USER_ID_HEADER)
}

/// Headers on every JSON response.
pub fn json_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        (
            "Access-Control-Allow-Origin".to_string(),
            ALLOW_ORIGIN.to_string(),
        ),
    ])
}

pub fn preflight_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "Access-Control-Allow-Origin".to_string(),
            ALLOW_ORIGIN.to_string(),
        ),
        (
            "Access-Control-Allow-Methods".to_string(),
            ALLOW_METHODS.to_string(),
        ),
        ("Access-Control-Allow-Headers".to_string(), allow_headers()),
        (
            "Access-Control-Max-Age".to_string(),
            MAX_AGE_SECS.to_string(),
        ),
    ])
}
