use chrono::{DateTime, Utc};
use octt_core::v201::{messages::*, types::*};

use super::Endpoint;
use crate::error::EndpointError;

/// Fixed `seqNo` of ad-hoc NotifyEvent messages.
pub const NOTIFY_EVENT_SEQ_NO: i32 = 1231230;

impl Endpoint {
    pub fn charging_station() -> ChargingStation {
        ChargingStation {
            serial_number: None,
            model: "CP Model 1.0".into(),
            modem: None,
            vendor_name: "tzi.app".into(),
            firmware_version: None,
        }
    }

    pub async fn send_boot_notification(&self) -> Result<BootNotificationResponse, EndpointError> {
        self.send_boot_notification_with_reason(BootReason::PowerUp).await
    }

    pub async fn send_boot_notification_with_reason(
        &self,
        reason: BootReason,
    ) -> Result<BootNotificationResponse, EndpointError> {
        self.call(BootNotificationRequest {
            charging_station: Self::charging_station(),
            reason,
        })
        .await
    }

    pub async fn send_status_notification(
        &self,
        evse_id: i32,
        connector_id: i32,
        status: ConnectorStatus,
    ) -> Result<StatusNotificationResponse, EndpointError> {
        log::info!("StatusNotification evse {evse_id} connector {connector_id}: {status}");
        self.call(StatusNotificationRequest {
            timestamp: Utc::now(),
            connector_status: status,
            evse_id,
            connector_id,
        })
        .await
    }

    pub async fn send_notify_event(&self, event_data: Vec<EventData>) -> Result<NotifyEventResponse, EndpointError> {
        self.call(NotifyEventRequest {
            generated_at: Utc::now(),
            tbc: None,
            seq_no: NOTIFY_EVENT_SEQ_NO,
            event_data,
        })
        .await
    }

    pub async fn send_authorization_request(&self, id_token: IdToken) -> Result<AuthorizeResponse, EndpointError> {
        self.call(AuthorizeRequest {
            id_token,
            certificate: None,
            iso15118_certificate_hash_data: None,
        })
        .await
    }

    /// Authorize with contract certificate data, for ISO 15118 Plug & Charge.
    pub async fn send_authorization_request_with_iso15118(
        &self,
        id_token: IdToken,
        iso15118_certificate_hash_data: Option<Vec<OcspRequestData>>,
        certificate: Option<String>,
    ) -> Result<AuthorizeResponse, EndpointError> {
        self.call(AuthorizeRequest {
            id_token,
            certificate,
            iso15118_certificate_hash_data,
        })
        .await
    }

    pub async fn send_transaction_event_request(
        &self,
        event: TransactionEventRequest,
    ) -> Result<TransactionEventResponse, EndpointError> {
        self.call(event).await
    }

    pub async fn send_sign_certificate_request(
        &self,
        csr: impl Into<String>,
        certificate_type: Option<CertificateSigningUse>,
    ) -> Result<SignCertificateResponse, EndpointError> {
        self.call(SignCertificateRequest {
            csr: csr.into(),
            certificate_type,
        })
        .await
    }

    pub async fn send_security_event_notification(
        &self,
        kind: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<SecurityEventNotificationResponse, EndpointError> {
        self.call(SecurityEventNotificationRequest {
            kind: kind.into(),
            timestamp,
            tech_info: None,
        })
        .await
    }

    pub async fn send_notify_report(
        &self,
        request_id: i32,
        seq_no: i32,
        report_data: Option<Vec<ReportData>>,
        tbc: bool,
    ) -> Result<NotifyReportResponse, EndpointError> {
        self.call(NotifyReportRequest {
            request_id,
            generated_at: Utc::now(),
            tbc: Some(tbc),
            seq_no,
            report_data,
        })
        .await
    }

    pub async fn send_reservation_status_update(
        &self,
        reservation_id: i32,
        reservation_update_status: ReservationUpdateStatus,
    ) -> Result<ReservationStatusUpdateResponse, EndpointError> {
        self.call(ReservationStatusUpdateRequest {
            reservation_id,
            reservation_update_status,
        })
        .await
    }

    /// `sampled_value` defaults to a single `0.0` Trigger reading.
    pub async fn send_meter_values(
        &self,
        evse_id: i32,
        sampled_value: Option<Vec<SampledValue>>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<MeterValuesResponse, EndpointError> {
        let sampled_value =
            sampled_value.unwrap_or_else(|| vec![SampledValue::new(0.0, Some(ReadingContext::Trigger))]);
        self.call(MeterValuesRequest {
            evse_id,
            meter_value: vec![MeterValue {
                sampled_value,
                timestamp: timestamp.unwrap_or_else(Utc::now),
            }],
        })
        .await
    }

    pub async fn send_log_status_notification_request(
        &self,
        status: UploadLogStatus,
        request_id: Option<i32>,
    ) -> Result<LogStatusNotificationResponse, EndpointError> {
        self.call(LogStatusNotificationRequest { status, request_id }).await
    }

    pub async fn send_firmware_status_notification_request(
        &self,
        status: FirmwareStatus,
        request_id: Option<i32>,
    ) -> Result<FirmwareStatusNotificationResponse, EndpointError> {
        self.call(FirmwareStatusNotificationRequest { status, request_id }).await
    }

    pub async fn send_data_transfer(
        &self,
        vendor_id: impl Into<String>,
        message_id: Option<String>,
        data: Option<serde_json::Value>,
    ) -> Result<DataTransferResponse, EndpointError> {
        self.call(DataTransferRequest {
            message_id,
            data,
            vendor_id: vendor_id.into(),
        })
        .await
    }

    pub async fn send_heartbeat_request(&self) -> Result<HeartbeatResponse, EndpointError> {
        self.call(HeartbeatRequest {}).await
    }

    pub async fn send_publish_firmware_status_notification_request(
        &self,
        status: PublishFirmwareStatus,
        location: Option<Vec<String>>,
        request_id: Option<i32>,
    ) -> Result<PublishFirmwareStatusNotificationResponse, EndpointError> {
        self.call(PublishFirmwareStatusNotificationRequest {
            status,
            location,
            request_id,
        })
        .await
    }

    pub async fn send_get_certificate_status_request(
        &self,
        ocsp_request_data: OcspRequestData,
    ) -> Result<GetCertificateStatusResponse, EndpointError> {
        self.call(GetCertificateStatusRequest { ocsp_request_data }).await
    }

    pub async fn send_get_15118_ev_certificate_request(
        &self,
        iso15118_schema_version: impl Into<String>,
        action: CertificateAction,
        exi_request: impl Into<String>,
    ) -> Result<Get15118EVCertificateResponse, EndpointError> {
        self.call(Get15118EVCertificateRequest {
            iso15118_schema_version: iso15118_schema_version.into(),
            action,
            exi_request: exi_request.into(),
        })
        .await
    }

    pub async fn send_notify_monitoring_report(
        &self,
        request_id: i32,
        seq_no: i32,
        monitor: Option<Vec<MonitoringData>>,
        tbc: bool,
    ) -> Result<NotifyMonitoringReportResponse, EndpointError> {
        self.call(NotifyMonitoringReportRequest {
            request_id,
            tbc: Some(tbc),
            seq_no,
            generated_at: Utc::now(),
            monitor,
        })
        .await
    }

    pub async fn send_notify_customer_information(
        &self,
        data: impl Into<String>,
        seq_no: i32,
        request_id: i32,
        tbc: bool,
    ) -> Result<NotifyCustomerInformationResponse, EndpointError> {
        self.call(NotifyCustomerInformationRequest {
            data: data.into(),
            tbc: Some(tbc),
            seq_no,
            generated_at: Utc::now(),
            request_id,
        })
        .await
    }

    pub async fn send_notify_display_messages(
        &self,
        request_id: i32,
        message_info: Option<Vec<MessageInfo>>,
        tbc: Option<bool>,
    ) -> Result<NotifyDisplayMessagesResponse, EndpointError> {
        self.call(NotifyDisplayMessagesRequest {
            request_id,
            tbc,
            message_info,
        })
        .await
    }
}
