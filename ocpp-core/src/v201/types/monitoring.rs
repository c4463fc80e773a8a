use super::{Component, StatusInfo, Variable};

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum MonitorType {
    UpperThreshold,
    LowerThreshold,
    Delta,
    Periodic,
    PeriodicClockAligned,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum MonitoringBase {
    All,
    FactoryDefault,
    HardWiredOnly,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum MonitoringCriterion {
    ThresholdMonitoring,
    DeltaMonitoring,
    PeriodicMonitoring,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetMonitoringData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<bool>,
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: MonitorType,
    pub severity: i32,
    pub component: Component,
    pub variable: Variable,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SetMonitoringResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub status: SetMonitoringStatus,
    #[serde(rename = "type")]
    pub kind: MonitorType,
    pub component: Component,
    pub variable: Variable,
    pub severity: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum SetMonitoringStatus {
    Accepted,
    UnknownComponent,
    UnknownVariable,
    UnsupportedMonitorType,
    Rejected,
    Duplicate,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClearMonitoringResult {
    pub status: ClearMonitoringStatus,
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum ClearMonitoringStatus {
    Accepted,
    Rejected,
    NotFound,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringData {
    pub component: Component,
    pub variable: Variable,
    pub variable_monitoring: Vec<VariableMonitoring>,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariableMonitoring {
    pub id: i32,
    pub transaction: bool,
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: MonitorType,
    pub severity: i32,
}
