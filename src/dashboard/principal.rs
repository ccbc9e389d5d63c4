//! The authenticated caller, as asserted by the upstream gateway.

use super::error::DashboardError;
use super::event::DashboardEvent;
use serde_json::Value;

pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    user_id: i64,
}

impl Principal {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }

    pub fn from_event(event: &DashboardEvent) -> Result<Self, DashboardError> {
        event
            .header(USER_ID_HEADER)
            .and_then(|value| value.trim().parse::<i64>().ok())
            .map(Self::new)
            .ok_or(DashboardError::Unauthorized)
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Resolves the `user_id` query parameter against the principal.
    pub fn authorize_query(&self, requested: Option<&str>) -> Result<i64, DashboardError> {
        match requested {
            None => Ok(self.user_id),
            Some(raw) => self.authorize(raw.trim().parse::<i64>().ok()),
        }
    }

    /// Resolves a `user_id` body field, a number or a numeric string.
    pub fn authorize_value(&self, requested: Option<&Value>) -> Result<i64, DashboardError> {
        match requested {
            None | Some(Value::Null) => Ok(self.user_id),
            Some(Value::Number(n)) => self.authorize(n.as_i64()),
            Some(Value::String(s)) => self.authorize(s.trim().parse::<i64>().ok()),
            Some(_) => Err(DashboardError::Forbidden),
        }
    }

    fn authorize(&self, requested: Option<i64>) -> Result<i64, DashboardError> {
        match requested {
            Some(user_id) if user_id == self.user_id => Ok(user_id),
            _ => Err(DashboardError::Forbidden),
        }
    }
}
