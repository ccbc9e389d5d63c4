use super::cors;
use super::error::DashboardError;
use super::event::{DashboardEvent, DashboardResponse};
use super::payload::PayoutBody;
use super::principal::Principal;
use super::projection::{
    AnalyticsPayload, CreatedPayoutPayload, EarningsPayload, ErrorPayload, PayoutsPayload,
    PlatformsPayload, ReleasesPayload,
};
use super::route::{resolve, Route};
use crate::dashboard_store::{BalancePolicy, DashboardStore, PayoutCreation};
use crate::server::metrics;
use anyhow::Context;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerSettings {
    /// Put the raw message of server-side failures in 500 bodies.
    pub expose_internal_errors: bool,
    /// Reject payouts that are not positive or exceed the available balance.
    pub enforce_payout_balance: bool,
}

impl DashboardResponse {
    pub fn json<T: Serialize>(status_code: u16, payload: &T) -> Result<Self, DashboardError> {
        let body = serde_json::to_string(payload).context("Failed to serialize response")?;
        Ok(Self {
            status_code,
            headers: cors::json_headers(),
            body,
            is_base64_encoded: false,
        })
    }

    pub fn error(status_code: u16, message: &str) -> Self {
        let body = serde_json::to_string(&ErrorPayload { error: message })
            .unwrap_or_else(|_| String::from(r#"{"error":"Internal server error"}"#));
        Self {
            status_code,
            headers: cors::json_headers(),
            body,
            is_base64_encoded: false,
        }
    }

    pub fn preflight() -> Self {
        Self {
            status_code: 200,
            headers: cors::preflight_headers(),
            body: String::new(),
            is_base64_encoded: false,
        }
    }
}

/// Turns dashboard events into responses. Holds no per-request state and
/// can be shared between threads.
pub struct DashboardHandler {
    store: Arc<dyn DashboardStore>,
    settings: HandlerSettings,
}

impl DashboardHandler {
    pub fn new(store: Arc<dyn DashboardStore>, settings: HandlerSettings) -> Self {
        Self { store, settings }
    }

    pub fn handle(&self, event: &DashboardEvent) -> DashboardResponse {
        let start = Instant::now();
        let route = resolve(&event.method(), event.query_param("action"));
        debug!("Resolved {:?} {:?} to {:?}", event.http_method, event.query_param("action"), route);

        let response = match self.dispatch(route, event) {
            Ok(response) => response,
            Err(err) => self.error_response(route, err),
        };

        metrics::record_dashboard_action(route.name(), response.status_code, start.elapsed());
        response
    }

    fn error_response(&self, route: Route, err: DashboardError) -> DashboardResponse {
        let status = err.status_code();
        match &err {
            DashboardError::Configuration(_) | DashboardError::Internal(_) => {
                error!("{} failed: {:#}", route.name(), err);
                metrics::record_error("internal", route.name());
            }
            DashboardError::Unauthorized | DashboardError::Forbidden => {
                warn!("{} rejected: {}", route.name(), err);
            }
            _ => debug!("{} rejected: {}", route.name(), err),
        }
        DashboardResponse::error(status, &err.public_message(self.settings.expose_internal_errors))
    }

    fn dispatch(
        &self,
        route: Route,
        event: &DashboardEvent,
    ) -> Result<DashboardResponse, DashboardError> {
        match route {
            Route::Preflight => Ok(DashboardResponse::preflight()),
            Route::NotFound => Err(DashboardError::NotFound),
            Route::ListReleases => {
                let user_id = requested_user(event)?;
                let rows = self.store.list_releases(user_id)?;
                DashboardResponse::json(200, &ReleasesPayload::from(rows))
            }
            Route::Analytics => {
                let user_id = requested_user(event)?;
                let rows = self.store.get_analytics(user_id)?;
                DashboardResponse::json(200, &AnalyticsPayload::from(rows))
            }
            Route::Earnings => {
                let user_id = requested_user(event)?;
                let row = self.store.get_earnings(user_id)?;
                DashboardResponse::json(200, &EarningsPayload::from(row))
            }
            Route::ListPayouts => {
                let user_id = requested_user(event)?;
                let rows = self.store.list_payouts(user_id)?;
                DashboardResponse::json(200, &PayoutsPayload::from(rows))
            }
            Route::CreatePayout => self.create_payout(event),
            Route::ListPlatforms => {
                Principal::from_event(event)?;
                let rows = self.store.list_active_platforms()?;
                DashboardResponse::json(200, &PlatformsPayload::from(rows))
            }
        }
    }

    fn create_payout(&self, event: &DashboardEvent) -> Result<DashboardResponse, DashboardError> {
        let principal = Principal::from_event(event)?;
        let body = PayoutBody::parse(event.body.as_deref())?;
        let user_id = principal.authorize_value(body.user_id())?;
        let payout = body.into_new_payout(user_id)?;

        let policy = if self.settings.enforce_payout_balance {
            if payout.amount <= 0.0 {
                return Err(DashboardError::Validation(
                    "amount must be positive".to_string(),
                ));
            }
            BalancePolicy::RequireAvailable
        } else {
            BalancePolicy::Unchecked
        };

        match self.store.create_payout(&payout, policy)? {
            PayoutCreation::Created { id } => {
                info!(
                    "Created payout {} for user {} ({} via {})",
                    id, user_id, payout.amount, payout.method
                );
                DashboardResponse::json(201, &CreatedPayoutPayload::pending(id))
            }
            PayoutCreation::InsufficientBalance { available } => {
                info!(
                    "Refused payout of {} for user {}, available {}",
                    payout.amount, user_id, available
                );
                Err(DashboardError::Validation(
                    "amount exceeds available balance".to_string(),
                ))
            }
        }
    }
}

/// The user a read is scoped to: the principal, unless a different
/// `user_id` was asked for.
fn requested_user(event: &DashboardEvent) -> Result<i64, DashboardError> {
    Principal::from_event(event)?.authorize_query(event.query_param("user_id"))
}
