#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum ResetType {
    Immediate,
    OnIdle,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum ResetStatus {
    Accepted,
    Rejected,
    Scheduled,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum ClearCacheStatus {
    Accepted,
    Rejected,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum RequestStartStopStatus {
    Accepted,
    Rejected,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum MessageTrigger {
    BootNotification,
    LogStatusNotification,
    FirmwareStatusNotification,
    Heartbeat,
    MeterValues,
    SignChargingStationCertificate,
    SignV2GCertificate,
    StatusNotification,
    TransactionEvent,
    SignCombinedCertificate,
    PublishFirmwareStatusNotification,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Clone, Debug)]
pub enum TriggerMessageStatus {
    Accepted,
    Rejected,
    NotImplemented,
}
