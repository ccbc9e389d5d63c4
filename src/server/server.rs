use anyhow::{Context, Result};
use std::{collections::HashMap, time::Duration};

use tracing::{error, info, warn};

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use serde::Serialize;

use super::metrics::metrics_handler;
use super::{log_requests, state::*, ServerConfig};
use crate::dashboard::{DashboardEvent, DashboardResponse, INTERNAL_ERROR_MESSAGE};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

impl IntoResponse for DashboardResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        for (name, value) in self.headers.iter() {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => warn!("Dropping invalid response header {:?}", name),
            }
        }
        response
    }
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    };
    Json(stats)
}

/// The store is blocking, so events are handled on the blocking pool.
async fn run_handler(handler: GuardedDashboardHandler, event: DashboardEvent) -> DashboardResponse {
    match tokio::task::spawn_blocking(move || handler.handle(&event)).await {
        Ok(response) => response,
        Err(err) => {
            error!("Dashboard handler task failed: {}", err);
            DashboardResponse::error(500, INTERNAL_ERROR_MESSAGE)
        }
    }
}

async fn dashboard_api(
    State(handler): State<GuardedDashboardHandler>,
    method: Method,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();

    let event = DashboardEvent {
        http_method: Some(method.as_str().to_string()),
        query_string_parameters: Some(params),
        headers: Some(headers),
        body: (!body.is_empty()).then_some(body),
    };

    run_handler(handler, event).await.into_response()
}

async fn post_event(
    State(handler): State<GuardedDashboardHandler>,
    Json(event): Json<DashboardEvent>,
) -> Json<DashboardResponse> {
    Json(run_handler(handler, event).await)
}

/// Paths and methods with no route of their own. The handler answers
/// OPTIONS with the preflight and anything else with its 404.
async fn unrouted(State(handler): State<GuardedDashboardHandler>, method: Method) -> Response {
    let event = DashboardEvent {
        http_method: Some(method.as_str().to_string()),
        ..Default::default()
    };
    run_handler(handler, event).await.into_response()
}

pub fn make_app(config: ServerConfig, handler: GuardedDashboardHandler) -> Router {
    let state = ServerState::new(config, handler);

    let dashboard_routes: Router = Router::new()
        .route("/api", any(dashboard_api))
        .route("/v1/event", post(post_event).options(unrouted))
        .fallback(unrouted)
        .with_state(state.clone());

    let home_router: Router = Router::new()
        .route("/", get(home).options(unrouted))
        .with_state(state.clone());

    home_router
        .merge(dashboard_routes)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
}

pub fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        return;
    }
    info!("Shutdown signal received");
}

pub async fn run_server(config: ServerConfig, handler: GuardedDashboardHandler) -> Result<()> {
    let bind_address = config.bind_address.clone();
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, handler);

    let listener = tokio::net::TcpListener::bind((bind_address.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", bind_address, port))?;
    let metrics_listener = tokio::net::TcpListener::bind((bind_address.as_str(), metrics_port))
        .await
        .with_context(|| format!("Failed to bind metrics port {}:{}", bind_address, metrics_port))?;

    tokio::spawn(async move {
        if let Err(err) = axum::serve(metrics_listener, make_metrics_app()).await {
            error!("Metrics server failed: {}", err);
        }
    });

    info!("Ready to serve at {}:{}!", bind_address, port);
    info!("Metrics available at port {}!", metrics_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
