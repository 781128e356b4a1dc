//! xDrip-shaped glucose readings.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::glucose::walk::Trend;

/// One element of the `/sgv.json` response array.
///
/// Field names mirror the xDrip+ web service wire format. The optional
/// fields are emitted by the steady mock but omitted by the failure server,
/// which serves the minimal shape the client is required to handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "_id")]
    pub id: String,

    /// Sensor glucose value in mg/dL.
    pub sgv: i32,

    /// Reading time as epoch milliseconds.
    pub date: i64,

    /// Reading time as an ISO-8601 string.
    #[serde(rename = "dateString")]
    pub date_string: String,

    /// Slope ordinal (1 = DoubleUp .. 7 = DoubleDown).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<u8>,

    /// Trend direction label, e.g. "Flat".
    pub direction: String,

    /// Reporting device name.
    pub device: String,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Reading {
    /// A minimal reading, as served by the failure endpoint.
    pub fn minimal(sgv: i32, trend: Trend, device: &str, at: DateTime<Utc>) -> Self {
        let millis = at.timestamp_millis();
        Self {
            id: format!("test_{millis}"),
            sgv,
            date: millis,
            date_string: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            trend: None,
            direction: trend.label().to_string(),
            device: device.to_string(),
            kind: None,
        }
    }

    /// A full xDrip-style reading, as served by the steady mock.
    pub fn full(sgv: i32, trend: Trend, device: &str, at: DateTime<Utc>) -> Self {
        let millis = at.timestamp_millis();
        Self {
            id: format!("mock_{millis}"),
            sgv,
            date: millis,
            date_string: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            trend: Some(trend.ordinal()),
            direction: trend.label().to_string(),
            device: device.to_string(),
            kind: Some("sgv".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_reading_omits_optional_fields() {
        let at = Utc::now();
        let reading = Reading::minimal(120, Trend::Flat, "FailureTestServer", at);
        let json = serde_json::to_value(&reading).unwrap();

        assert_eq!(json["sgv"], 120);
        assert_eq!(json["direction"], "Flat");
        assert_eq!(json["date"], at.timestamp_millis());
        assert!(json.get("trend").is_none());
        assert!(json.get("type").is_none());
    }

    #[test]
    fn full_reading_round_trips() {
        let reading = Reading::full(142, Trend::FortyFiveUp, "MockSensor", Utc::now());
        let json = serde_json::to_string(&reading).unwrap();
        let back: Reading = serde_json::from_str(&json).unwrap();

        assert_eq!(back.sgv, 142);
        assert_eq!(back.trend, Some(3));
        assert_eq!(back.kind.as_deref(), Some("sgv"));
        assert!(back.id.starts_with("mock_"));
    }
}
