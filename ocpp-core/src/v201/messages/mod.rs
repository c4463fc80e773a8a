pub mod authorize;
pub mod boot_notification;
pub mod cancel_reservation;
pub mod certificate_signed;
pub mod change_availability;
pub mod clear_cache;
pub mod clear_charging_profile;
pub mod clear_display_message;
pub mod clear_variable_monitoring;
pub mod cleared_charging_limit;
pub mod cost_updated;
pub mod customer_information;
pub mod data_transfer;
pub mod delete_certificate;
pub mod firmware_status_notification;
pub mod get_15118_ev_certificate;
pub mod get_base_report;
pub mod get_certificate_status;
pub mod get_charging_profiles;
pub mod get_composite_schedule;
pub mod get_display_messages;
pub mod get_installed_certificate_ids;
pub mod get_local_list_version;
pub mod get_log;
pub mod get_monitoring_report;
pub mod get_report;
pub mod get_transaction_status;
pub mod get_variables;
pub mod heartbeat;
pub mod install_certificate;
pub mod log_status_notification;
pub mod meter_values;
pub mod notify_charging_limit;
pub mod notify_customer_information;
pub mod notify_display_messages;
pub mod notify_ev_charging_needs;
pub mod notify_ev_charging_schedule;
pub mod notify_event;
pub mod notify_monitoring_report;
pub mod notify_report;
pub mod publish_firmware;
pub mod publish_firmware_status_notification;
pub mod report_charging_profiles;
pub mod request_start_transaction;
pub mod request_stop_transaction;
pub mod reservation_status_update;
pub mod reserve_now;
pub mod reset;
pub mod security_event_notification;
pub mod send_local_list;
pub mod set_charging_profile;
pub mod set_display_message;
pub mod set_monitoring_base;
pub mod set_monitoring_level;
pub mod set_network_profile;
pub mod set_variable_monitoring;
pub mod set_variables;
pub mod sign_certificate;
pub mod status_notification;
pub mod transaction_event;
pub mod trigger_message;
pub mod unlock_connector;
pub mod unpublish_firmware;
pub mod update_firmware;

pub use authorize::{AuthorizeRequest, AuthorizeResponse};
pub use boot_notification::{BootNotificationRequest, BootNotificationResponse};
pub use cancel_reservation::{CancelReservationRequest, CancelReservationResponse};
pub use certificate_signed::{CertificateSignedRequest, CertificateSignedResponse};
pub use change_availability::{ChangeAvailabilityRequest, ChangeAvailabilityResponse};
pub use clear_cache::{ClearCacheRequest, ClearCacheResponse};
pub use clear_charging_profile::{ClearChargingProfileRequest, ClearChargingProfileResponse};
pub use clear_display_message::{ClearDisplayMessageRequest, ClearDisplayMessageResponse};
pub use clear_variable_monitoring::{ClearVariableMonitoringRequest, ClearVariableMonitoringResponse};
pub use cleared_charging_limit::{ClearedChargingLimitRequest, ClearedChargingLimitResponse};
pub use cost_updated::{CostUpdatedRequest, CostUpdatedResponse};
pub use customer_information::{CustomerInformationRequest, CustomerInformationResponse};
pub use data_transfer::{DataTransferRequest, DataTransferResponse};
pub use delete_certificate::{DeleteCertificateRequest, DeleteCertificateResponse};
pub use firmware_status_notification::{FirmwareStatusNotificationRequest, FirmwareStatusNotificationResponse};
pub use get_15118_ev_certificate::{Get15118EVCertificateRequest, Get15118EVCertificateResponse};
pub use get_base_report::{GetBaseReportRequest, GetBaseReportResponse};
pub use get_certificate_status::{GetCertificateStatusRequest, GetCertificateStatusResponse};
pub use get_charging_profiles::{GetChargingProfilesRequest, GetChargingProfilesResponse};
pub use get_composite_schedule::{GetCompositeScheduleRequest, GetCompositeScheduleResponse};
pub use get_display_messages::{GetDisplayMessagesRequest, GetDisplayMessagesResponse};
pub use get_installed_certificate_ids::{GetInstalledCertificateIdsRequest, GetInstalledCertificateIdsResponse};
pub use get_local_list_version::{GetLocalListVersionRequest, GetLocalListVersionResponse};
pub use get_log::{GetLogRequest, GetLogResponse};
pub use get_monitoring_report::{GetMonitoringReportRequest, GetMonitoringReportResponse};
pub use get_report::{GetReportRequest, GetReportResponse};
pub use get_transaction_status::{GetTransactionStatusRequest, GetTransactionStatusResponse};
pub use get_variables::{GetVariablesRequest, GetVariablesResponse};
pub use heartbeat::{HeartbeatRequest, HeartbeatResponse};
pub use install_certificate::{InstallCertificateRequest, InstallCertificateResponse};
pub use log_status_notification::{LogStatusNotificationRequest, LogStatusNotificationResponse};
pub use meter_values::{MeterValuesRequest, MeterValuesResponse};
pub use notify_charging_limit::{NotifyChargingLimitRequest, NotifyChargingLimitResponse};
pub use notify_customer_information::{NotifyCustomerInformationRequest, NotifyCustomerInformationResponse};
pub use notify_display_messages::{NotifyDisplayMessagesRequest, NotifyDisplayMessagesResponse};
pub use notify_ev_charging_needs::{NotifyEVChargingNeedsRequest, NotifyEVChargingNeedsResponse};
pub use notify_ev_charging_schedule::{NotifyEVChargingScheduleRequest, NotifyEVChargingScheduleResponse};
pub use notify_event::{NotifyEventRequest, NotifyEventResponse};
pub use notify_monitoring_report::{NotifyMonitoringReportRequest, NotifyMonitoringReportResponse};
pub use notify_report::{NotifyReportRequest, NotifyReportResponse};
pub use publish_firmware::{PublishFirmwareRequest, PublishFirmwareResponse};
pub use publish_firmware_status_notification::{PublishFirmwareStatusNotificationRequest, PublishFirmwareStatusNotificationResponse};
pub use report_charging_profiles::{ReportChargingProfilesRequest, ReportChargingProfilesResponse};
pub use request_start_transaction::{RequestStartTransactionRequest, RequestStartTransactionResponse};
pub use request_stop_transaction::{RequestStopTransactionRequest, RequestStopTransactionResponse};
pub use reservation_status_update::{ReservationStatusUpdateRequest, ReservationStatusUpdateResponse};
pub use reserve_now::{ReserveNowRequest, ReserveNowResponse};
pub use reset::{ResetRequest, ResetResponse};
pub use security_event_notification::{SecurityEventNotificationRequest, SecurityEventNotificationResponse};
pub use send_local_list::{SendLocalListRequest, SendLocalListResponse};
pub use set_charging_profile::{SetChargingProfileRequest, SetChargingProfileResponse};
pub use set_display_message::{SetDisplayMessageRequest, SetDisplayMessageResponse};
pub use set_monitoring_base::{SetMonitoringBaseRequest, SetMonitoringBaseResponse};
pub use set_monitoring_level::{SetMonitoringLevelRequest, SetMonitoringLevelResponse};
pub use set_network_profile::{SetNetworkProfileRequest, SetNetworkProfileResponse};
pub use set_variable_monitoring::{SetVariableMonitoringRequest, SetVariableMonitoringResponse};
pub use set_variables::{SetVariablesRequest, SetVariablesResponse};
pub use sign_certificate::{SignCertificateRequest, SignCertificateResponse};
pub use status_notification::{StatusNotificationRequest, StatusNotificationResponse};
pub use transaction_event::{TransactionEventRequest, TransactionEventResponse};
pub use trigger_message::{TriggerMessageRequest, TriggerMessageResponse};
pub use unlock_connector::{UnlockConnectorRequest, UnlockConnectorResponse};
pub use unpublish_firmware::{UnpublishFirmwareRequest, UnpublishFirmwareResponse};
pub use update_firmware::{UpdateFirmwareRequest, UpdateFirmwareResponse};

use super::{Action, OcppRequest};

macro_rules! bind {
    ($($request:ident => $response:ident : $action:ident),+ $(,)?) => {
        $(
            impl OcppRequest for $request {
                const ACTION: Action = Action::$action;
                type Response = $response;
            }
        )+
    };
}

bind! {
    AuthorizeRequest => AuthorizeResponse : Authorize,
    BootNotificationRequest => BootNotificationResponse : BootNotification,
    CancelReservationRequest => CancelReservationResponse : CancelReservation,
    CertificateSignedRequest => CertificateSignedResponse : CertificateSigned,
    ChangeAvailabilityRequest => ChangeAvailabilityResponse : ChangeAvailability,
    ClearCacheRequest => ClearCacheResponse : ClearCache,
    ClearChargingProfileRequest => ClearChargingProfileResponse : ClearChargingProfile,
    ClearDisplayMessageRequest => ClearDisplayMessageResponse : ClearDisplayMessage,
    ClearVariableMonitoringRequest => ClearVariableMonitoringResponse : ClearVariableMonitoring,
    ClearedChargingLimitRequest => ClearedChargingLimitResponse : ClearedChargingLimit,
    CostUpdatedRequest => CostUpdatedResponse : CostUpdated,
    CustomerInformationRequest => CustomerInformationResponse : CustomerInformation,
    DataTransferRequest => DataTransferResponse : DataTransfer,
    DeleteCertificateRequest => DeleteCertificateResponse : DeleteCertificate,
    FirmwareStatusNotificationRequest => FirmwareStatusNotificationResponse : FirmwareStatusNotification,
    Get15118EVCertificateRequest => Get15118EVCertificateResponse : Get15118EVCertificate,
    GetBaseReportRequest => GetBaseReportResponse : GetBaseReport,
    GetCertificateStatusRequest => GetCertificateStatusResponse : GetCertificateStatus,
    GetChargingProfilesRequest => GetChargingProfilesResponse : GetChargingProfiles,
    GetCompositeScheduleRequest => GetCompositeScheduleResponse : GetCompositeSchedule,
    GetDisplayMessagesRequest => GetDisplayMessagesResponse : GetDisplayMessages,
    GetInstalledCertificateIdsRequest => GetInstalledCertificateIdsResponse : GetInstalledCertificateIds,
    GetLocalListVersionRequest => GetLocalListVersionResponse : GetLocalListVersion,
    GetLogRequest => GetLogResponse : GetLog,
    GetMonitoringReportRequest => GetMonitoringReportResponse : GetMonitoringReport,
    GetReportRequest => GetReportResponse : GetReport,
    GetTransactionStatusRequest => GetTransactionStatusResponse : GetTransactionStatus,
    GetVariablesRequest => GetVariablesResponse : GetVariables,
    HeartbeatRequest => HeartbeatResponse : Heartbeat,
    InstallCertificateRequest => InstallCertificateResponse : InstallCertificate,
    LogStatusNotificationRequest => LogStatusNotificationResponse : LogStatusNotification,
    MeterValuesRequest => MeterValuesResponse : MeterValues,
    NotifyChargingLimitRequest => NotifyChargingLimitResponse : NotifyChargingLimit,
    NotifyCustomerInformationRequest => NotifyCustomerInformationResponse : NotifyCustomerInformation,
    NotifyDisplayMessagesRequest => NotifyDisplayMessagesResponse : NotifyDisplayMessages,
    NotifyEVChargingNeedsRequest => NotifyEVChargingNeedsResponse : NotifyEVChargingNeeds,
    NotifyEVChargingScheduleRequest => NotifyEVChargingScheduleResponse : NotifyEVChargingSchedule,
    NotifyEventRequest => NotifyEventResponse : NotifyEvent,
    NotifyMonitoringReportRequest => NotifyMonitoringReportResponse : NotifyMonitoringReport,
    NotifyReportRequest => NotifyReportResponse : NotifyReport,
    PublishFirmwareRequest => PublishFirmwareResponse : PublishFirmware,
    PublishFirmwareStatusNotificationRequest => PublishFirmwareStatusNotificationResponse : PublishFirmwareStatusNotification,
    ReportChargingProfilesRequest => ReportChargingProfilesResponse : ReportChargingProfiles,
    RequestStartTransactionRequest => RequestStartTransactionResponse : RequestStartTransaction,
    RequestStopTransactionRequest => RequestStopTransactionResponse : RequestStopTransaction,
    ReservationStatusUpdateRequest => ReservationStatusUpdateResponse : ReservationStatusUpdate,
    ReserveNowRequest => ReserveNowResponse : ReserveNow,
    ResetRequest => ResetResponse : Reset,
    SecurityEventNotificationRequest => SecurityEventNotificationResponse : SecurityEventNotification,
    SendLocalListRequest => SendLocalListResponse : SendLocalList,
    SetChargingProfileRequest => SetChargingProfileResponse : SetChargingProfile,
    SetDisplayMessageRequest => SetDisplayMessageResponse : SetDisplayMessage,
    SetMonitoringBaseRequest => SetMonitoringBaseResponse : SetMonitoringBase,
    SetMonitoringLevelRequest => SetMonitoringLevelResponse : SetMonitoringLevel,
    SetNetworkProfileRequest => SetNetworkProfileResponse : SetNetworkProfile,
    SetVariableMonitoringRequest => SetVariableMonitoringResponse : SetVariableMonitoring,
    SetVariablesRequest => SetVariablesResponse : SetVariables,
    SignCertificateRequest => SignCertificateResponse : SignCertificate,
    StatusNotificationRequest => StatusNotificationResponse : StatusNotification,
    TransactionEventRequest => TransactionEventResponse : TransactionEvent,
    TriggerMessageRequest => TriggerMessageResponse : TriggerMessage,
    UnlockConnectorRequest => UnlockConnectorResponse : UnlockConnector,
    UnpublishFirmwareRequest => UnpublishFirmwareResponse : UnpublishFirmware,
    UpdateFirmwareRequest => UpdateFirmwareResponse : UpdateFirmware,
}
