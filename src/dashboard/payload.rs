//! Payout request body parsing.
//!
//! A field is "present" unless it is null, `false`, `0`, or an empty
//! string, array or object.

use super::error::DashboardError;
use crate::dashboard_store::NewPayout;
use anyhow::anyhow;
use serde_json::{Map, Value};

pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::Bool(true)) => true,
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(fields)) => !fields.is_empty(),
    }
}

fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    amount.is_finite().then_some(amount)
}

/// Strings are kept as-is, anything else as its JSON text.
fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct PayoutBody {
    fields: Map<String, Value>,
}

impl PayoutBody {
    /// A missing or blank body is an empty object. Anything that is not a
    /// JSON object is an internal error.
    pub fn parse(body: Option<&str>) -> Result<Self, DashboardError> {
        let body = match body.map(str::trim) {
            None | Some("") => return Ok(Self::default()),
            Some(body) => body,
        };
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(_) => Err(DashboardError::Internal(anyhow!(
                "Payout request body is not a JSON object"
            ))),
            Err(err) => Err(DashboardError::Internal(anyhow!(
                "Invalid payout request body: {}",
                err
            ))),
        }
    }

    pub fn user_id(&self) -> Option<&Value> {
        self.fields.get("user_id")
    }

    pub fn into_new_payout(self, user_id: i64) -> Result<NewPayout, DashboardError> {
        let amount = self.fields.get("amount");
        let method = self.fields.get("method");
        let (amount, method) = match (amount, method) {
            (Some(amount), Some(method)) if is_present(Some(amount)) && is_present(Some(method)) => {
                (amount, method)
            }
            _ => {
                return Err(DashboardError::Validation(
                    "amount and method are required".to_string(),
                ))
            }
        };
        let amount = parse_amount(amount)
            .ok_or_else(|| DashboardError::Validation("amount must be a number".to_string()))?;

        let details = match self.fields.get("details") {
            None | Some(Value::Null) => None,
            Some(details) => Some(as_text(details)),
        };

        Ok(NewPayout {
            user_id,
            amount,
            method: as_text(method),
            details,
        })
    }
}
