//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all dashboard actions.
//!
//! When API routes or request formats change, update only this file.
#![allow(dead_code)]

use super::constants::*;
use reqwest::{Method, Response};
use serde_json::Value;
use std::time::Duration;

/// HTTP test client, optionally acting as a gateway-authenticated user
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    /// Sent as `X-User-Id` when set
    pub user_id: Option<i64>,
}

impl TestClient {
    /// Creates a client that sends no principal header
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            user_id: None,
        }
    }

    /// Creates a client whose requests carry `X-User-Id: <user_id>`
    pub fn as_user(base_url: String, user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::new(base_url)
        }
    }

    fn api_request(&self, method: Method, query: &[(&str, String)]) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}/api", self.base_url))
            .query(query);
        if let Some(user_id) = self.user_id {
            request = request.header("X-User-Id", user_id.to_string());
        }
        request
    }

    /// Sends `method /api?action=<action>` with an optional `user_id` parameter
    pub async fn action(
        &self,
        method: Method,
        action: Option<&str>,
        user_id: Option<&str>,
    ) -> Response {
        let mut query = Vec::new();
        if let Some(action) = action {
            query.push(("action", action.to_string()));
        }
        if let Some(user_id) = user_id {
            query.push(("user_id", user_id.to_string()));
        }
        self.api_request(method, &query)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_action(&self, action: &str) -> Response {
        self.action(Method::GET, Some(action), None).await
    }

    // ========================================================================
    // Dashboard Actions
    // ========================================================================

    pub async fn get_releases(&self) -> Response {
        self.get_action("releases").await
    }

    pub async fn get_analytics(&self) -> Response {
        self.get_action("analytics").await
    }

    pub async fn get_earnings(&self) -> Response {
        self.get_action("earnings").await
    }

    pub async fn get_payouts(&self) -> Response {
        self.get_action("payouts").await
    }

    pub async fn get_platforms(&self) -> Response {
        self.get_action("platforms").await
    }

    /// POST /api?action=payouts with a JSON body
    pub async fn create_payout(&self, body: &Value) -> Response {
        self.create_payout_raw(&body.to_string()).await
    }

    /// POST /api?action=payouts with the body sent verbatim
    pub async fn create_payout_raw(&self, body: &str) -> Response {
        self.api_request(Method::POST, &[("action", "payouts".to_string())])
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn preflight(&self, action: Option<&str>) -> Response {
        self.action(Method::OPTIONS, action, None).await
    }

    // ========================================================================
    // Other Endpoints
    // ========================================================================

    /// POST /v1/event with a raw event envelope
    pub async fn send_event(&self, event: &Value) -> Response {
        self.client
            .post(format!("{}/v1/event", self.base_url))
            .json(event)
            .send()
            .await
            .expect("Request failed")
    }

    pub async fn get_status(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Request failed")
    }
}

/// Reads a response body as JSON
pub async fn json_body(response: Response) -> Value {
    response.json().await.expect("Response body is not JSON")
}
