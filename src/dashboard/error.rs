use crate::dashboard_store::StoreError;
use thiserror::Error;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum DashboardError {
    /// The store has no database to connect to.
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<StoreError>() {
            Some(StoreError::MissingDatabaseUrl) => DashboardError::Configuration(err.to_string()),
            _ => DashboardError::Internal(err),
        }
    }
}

impl DashboardError {
    pub fn status_code(&self) -> u16 {
        match self {
            DashboardError::Configuration(_) => 500,
            DashboardError::Validation(_) => 400,
            DashboardError::Unauthorized => 401,
            DashboardError::Forbidden => 403,
            DashboardError::NotFound => 404,
            DashboardError::Internal(_) => 500,
        }
    }

    /// Message placed in the response body. Server-side failures are only
    /// described when `expose_internal` is set.
    pub fn public_message(&self, expose_internal: bool) -> String {
        match self {
            DashboardError::Configuration(_) | DashboardError::Internal(_) if !expose_internal => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            DashboardError::Internal(err) => format!("{:#}", err),
            other => other.to_string(),
        }
    }
}
