//! Request types for the timesheet engine API.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::PayPeriod;

/// Request body for the `/periods/resolve` endpoint.
///
/// Months are numbered 1-12.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// First day of the period, 1 or 16.
    pub start_day: u32,
    /// Last day of the period.
    pub end_day: u32,
}

impl ResolveRequest {
    /// Validates the request into a [`PayPeriod`].
    pub fn to_period(&self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.year, self.month, self.start_day, self.end_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_resolve_request() {
        let json = r#"{"year": 2024, "month": 10, "start_day": 1, "end_day": 15}"#;
        let request: ResolveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.year, 2024);
        assert_eq!(request.month, 10);

        let period = request.to_period().unwrap();
        assert_eq!(period.label(), "10/01/2024 - 10/15/2024");
    }

    #[test]
    fn test_invalid_request_fails_validation() {
        let request = ResolveRequest {
            year: 2024,
            month: 13,
            start_day: 1,
            end_day: 15,
        };
        assert!(request.to_period().is_err());
    }

    #[test]
    fn test_missing_field_fails_deserialization() {
        let json = r#"{"year": 2024, "month": 10, "start_day": 1}"#;
        let result: Result<ResolveRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
