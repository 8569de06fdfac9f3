use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub response_time_ms: Option<u64>,
    pub last_checked: DateTime<Utc>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl ComponentHealth {
    fn new(status: ComponentStatus, message: Option<String>, response_time_ms: Option<u64>) -> Self {
        Self {
            status,
            message,
            response_time_ms,
            last_checked: Utc::now(),
            details: BTreeMap::new(),
        }
    }

    pub fn healthy(response_time_ms: u64) -> Self {
        Self::new(ComponentStatus::Healthy, None, Some(response_time_ms))
    }

    pub fn degraded(message: String, response_time_ms: Option<u64>) -> Self {
        Self::new(ComponentStatus::Degraded, Some(message), response_time_ms)
    }

    pub fn unhealthy(message: String) -> Self {
        Self::new(ComponentStatus::Unhealthy, Some(message), None)
    }

    pub fn with_detail(mut self, key: &str, value: serde_json::Value) -> Self {
        self.details.insert(key.to_string(), value);
        self
    }
}

/// Overall status is the worst component status.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: ComponentStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub components: BTreeMap<String, ComponentHealth>,
}

impl HealthReport {
    pub fn new(version: String, uptime_seconds: u64) -> Self {
        Self {
            status: ComponentStatus::Healthy,
            timestamp: Utc::now(),
            version,
            uptime_seconds,
            components: BTreeMap::new(),
        }
    }

    pub fn add_component(&mut self, name: &str, health: ComponentHealth) {
        self.status = self.status.max(health.status);
        self.components.insert(name.to_string(), health);
    }

    pub fn is_healthy(&self) -> bool {
        self.status != ComponentStatus::Unhealthy
    }
}
