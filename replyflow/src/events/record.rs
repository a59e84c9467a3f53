//! Service event records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One service event, emitted for downstream analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEvent {
    /// Unique event id.
    pub id: Uuid,

    /// Name of the emitting service.
    pub service: String,

    /// Event name, e.g. `"extract-top-response"`.
    pub event: String,

    /// Emission time.
    pub timestamp: DateTime<Utc>,

    /// Elapsed milliseconds for the operation, when measured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_ms: Option<f64>,

    /// Event payload.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl ServiceEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(service: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            service: service.into(),
            event: event.into(),
            timestamp: Utc::now(),
            elapsed_ms: None,
            data: serde_json::Value::Null,
        }
    }

    /// Records the elapsed time of the operation.
    #[must_use]
    pub fn with_elapsed_ms(mut self, elapsed_ms: f64) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }

    /// Attaches a payload.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}
