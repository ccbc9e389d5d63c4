use axum::extract::FromRef;

use crate::dashboard::DashboardHandler;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedDashboardHandler = Arc<DashboardHandler>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub handler: GuardedDashboardHandler,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, handler: GuardedDashboardHandler) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            handler,
            hash: env!("GIT_HASH").to_string(),
        }
    }
}

impl FromRef<ServerState> for GuardedDashboardHandler {
    fn from_ref(input: &ServerState) -> Self {
        input.handler.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
