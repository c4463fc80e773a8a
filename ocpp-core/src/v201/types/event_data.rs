use chrono::{DateTime, Utc};

use super::{Component, Variable};

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    pub event_id: i32,
    pub timestamp: DateTime<Utc>,
    pub trigger: EventTrigger,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<i32>,
    pub actual_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleared: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    pub component: Component,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable_monitoring_id: Option<i32>,
    pub event_notification_type: EventNotification,
    pub variable: Variable,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum EventTrigger {
    Alerting,
    Delta,
    Periodic,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum EventNotification {
    HardWiredNotification,
    HardWiredMonitor,
    PreconfiguredMonitor,
    CustomMonitor,
}
