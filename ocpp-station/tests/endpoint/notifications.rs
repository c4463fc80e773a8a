use chrono::Utc;
use octt_core::v201::types::{
    BootReason, CertificateAction, CertificateSigningUse, Component, FirmwareStatus, GenericStatus,
    GetCertificateStatus, HashAlgorithm, IdToken, IdTokenKind, Iso15118EVCertificateStatus, MonitorType,
    MonitoringData, OcspRequestData, PublishFirmwareStatus, ReportData, ReservationUpdateStatus, UploadLogStatus,
    Variable, VariableAttribute, VariableMonitoring,
};
use octt_station::{reusable_states as rs, reusable_states::TransactionContext, Endpoint};
use serde_json::json;

use crate::harness::{
    csms::{CsmsConfig, MockCsms, VALID_ID_TOKEN},
    harness::StationHarness,
};

fn ocsp_data() -> OcspRequestData {
    OcspRequestData {
        hash_algorithm: HashAlgorithm::SHA256,
        issuer_name_hash: "a1b2c3".into(),
        issuer_key_hash: "d4e5f6".into(),
        serial_number: "0102".into(),
        responder_url: "http://ocsp.example.com".into(),
    }
}

pub async fn boot_reason_and_security_event() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;

    h.cp.send_boot_notification_with_reason(BootReason::FirmwareUpdate)
        .await
        .unwrap();
    let sent = h.csms.wait_for_call("BootNotification").await;
    assert_eq!(sent["reason"], "FirmwareUpdate");
    assert_eq!(sent["chargingStation"]["model"], "CP Model 1.0");

    h.cp.send_security_event_notification("InvalidFirmwareSigningCertificate", Utc::now())
        .await
        .unwrap();
    let sent = h.csms.wait_for_call("SecurityEventNotification").await;
    assert_eq!(sent["type"], "InvalidFirmwareSigningCertificate");
    assert!(sent["timestamp"].is_string());
    assert!(sent.get("techInfo").is_none());

    let _ = h.session.stop().await;
}

pub async fn certificate_requests() {
    let csms = MockCsms::start(CsmsConfig {
        answers: vec![
            ("SignCertificate".into(), json!({ "status": "Accepted" })),
            (
                "GetCertificateStatus".into(),
                json!({ "status": "Accepted", "ocspResult": "MIIB" }),
            ),
            (
                "Get15118EVCertificate".into(),
                json!({ "status": "Accepted", "exiResponse": "gAQ=" }),
            ),
        ],
        ..Default::default()
    })
    .await;
    let cp = Endpoint::builder("CP_1").strict_schema(true).build();
    let h = StationHarness::connect(&csms, cp).await;

    h.cp.send_authorization_request_with_iso15118(
        IdToken::new(VALID_ID_TOKEN, IdTokenKind::EMaid),
        Some(vec![ocsp_data()]),
        Some("-----BEGIN CERTIFICATE-----".into()),
    )
    .await
    .unwrap();
    let sent = h.csms.wait_for_call("Authorize").await;
    assert_eq!(sent["idToken"]["type"], "eMAID");
    assert_eq!(sent["certificate"], "-----BEGIN CERTIFICATE-----");
    let hash_data = &sent["iso15118CertificateHashData"][0];
    assert_eq!(hash_data["hashAlgorithm"], "SHA256");
    assert_eq!(hash_data["responderURL"], "http://ocsp.example.com");

    let res = h
        .cp
        .send_sign_certificate_request("MIICSR", Some(CertificateSigningUse::ChargingStationCertificate))
        .await
        .unwrap();
    assert_eq!(res.status, GenericStatus::Accepted);
    let sent = h.csms.wait_for_call("SignCertificate").await;
    assert_eq!(sent, json!({ "csr": "MIICSR", "certificateType": "ChargingStationCertificate" }));

    let res = h.cp.send_get_certificate_status_request(ocsp_data()).await.unwrap();
    assert_eq!(res.status, GetCertificateStatus::Accepted);
    assert_eq!(res.ocsp_result.as_deref(), Some("MIIB"));
    let sent = h.csms.wait_for_call("GetCertificateStatus").await;
    assert_eq!(sent["ocspRequestData"]["serialNumber"], "0102");

    let res = h
        .cp
        .send_get_15118_ev_certificate_request("urn:iso:15118:2:2013:MsgDef", CertificateAction::Install, "gAQ=")
        .await
        .unwrap();
    assert_eq!(res.status, Iso15118EVCertificateStatus::Accepted);
    assert_eq!(res.exi_response, "gAQ=");
    let sent = h.csms.wait_for_call("Get15118EVCertificate").await;
    assert_eq!(sent["iso15118SchemaVersion"], "urn:iso:15118:2:2013:MsgDef");
    assert_eq!(sent["action"], "Install");
    assert_eq!(sent["exiRequest"], "gAQ=");

    let _ = h.session.stop().await;
}

pub async fn device_model_reports() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;

    let report = ReportData {
        component: Component::new("OCPPCommCtrlr"),
        variable: Variable::new("HeartbeatInterval"),
        variable_attribute: vec![VariableAttribute {
            value: Some("300".into()),
            ..Default::default()
        }],
        variable_characteristics: None,
    };
    h.cp.send_notify_report(7, 0, Some(vec![report]), false).await.unwrap();
    let sent = h.csms.wait_for_call("NotifyReport").await;
    assert_eq!(sent["requestId"], 7);
    assert_eq!(sent["seqNo"], 0);
    assert_eq!(sent["tbc"], false);
    assert!(sent["generatedAt"].is_string());
    assert_eq!(sent["reportData"][0]["component"]["name"], "OCPPCommCtrlr");
    assert_eq!(sent["reportData"][0]["variableAttribute"][0]["value"], "300");

    let monitor = MonitoringData {
        component: Component::new("EVSE"),
        variable: Variable::new("Power"),
        variable_monitoring: vec![VariableMonitoring {
            id: 1,
            transaction: false,
            value: 100.0,
            kind: MonitorType::Delta,
            severity: 8,
        }],
    };
    h.cp.send_notify_monitoring_report(3, 1, Some(vec![monitor]), true)
        .await
        .unwrap();
    let sent = h.csms.wait_for_call("NotifyMonitoringReport").await;
    assert_eq!(sent["requestId"], 3);
    assert_eq!(sent["seqNo"], 1);
    assert_eq!(sent["tbc"], true);
    assert_eq!(sent["monitor"][0]["variableMonitoring"][0]["type"], "Delta");
    assert_eq!(sent["monitor"][0]["variableMonitoring"][0]["severity"], 8);

    h.cp.send_notify_customer_information("idToken: 100000C01", 0, 5, false)
        .await
        .unwrap();
    let sent = h.csms.wait_for_call("NotifyCustomerInformation").await;
    assert_eq!(sent["data"], "idToken: 100000C01");
    assert_eq!(sent["requestId"], 5);
    assert_eq!(sent["seqNo"], 0);
    assert_eq!(sent["tbc"], false);

    let _ = h.session.stop().await;
}

pub async fn firmware_and_log_status() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;

    h.cp.send_firmware_status_notification_request(FirmwareStatus::Downloading, Some(1))
        .await
        .unwrap();
    h.cp.send_firmware_status_notification_request(FirmwareStatus::Installed, None)
        .await
        .unwrap();
    let sent = h.csms.calls("FirmwareStatusNotification");
    assert_eq!(sent, vec![json!({ "status": "Downloading", "requestId": 1 }), json!({ "status": "Installed" })]);

    h.cp.send_log_status_notification_request(UploadLogStatus::Uploading, Some(2))
        .await
        .unwrap();
    let sent = h.csms.wait_for_call("LogStatusNotification").await;
    assert_eq!(sent, json!({ "status": "Uploading", "requestId": 2 }));

    h.cp.send_publish_firmware_status_notification_request(
        PublishFirmwareStatus::Published,
        Some(vec!["http://local.cs/firmware.bin".into()]),
        Some(3),
    )
    .await
    .unwrap();
    let sent = h.csms.wait_for_call("PublishFirmwareStatusNotification").await;
    assert_eq!(sent["status"], "Published");
    assert_eq!(sent["location"], json!(["http://local.cs/firmware.bin"]));
    assert_eq!(sent["requestId"], 3);

    let _ = h.session.stop().await;
}

pub async fn reservation_status_update() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;

    h.cp.send_reservation_status_update(42, ReservationUpdateStatus::Expired)
        .await
        .unwrap();
    let sent = h.csms.wait_for_call("ReservationStatusUpdate").await;
    assert_eq!(sent, json!({ "reservationId": 42, "reservationUpdateStatus": "Expired" }));

    let _ = h.session.stop().await;
}

pub async fn suspended_and_parking_bay_states() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;
    let cp = &h.cp;
    let token = IdToken::new(VALID_ID_TOKEN, IdTokenKind::Central);

    rs::booted(cp, 1, 1).await.unwrap();
    let ctx = TransactionContext::new(1, 1);
    rs::authorized(cp, &token, &ctx, false).await.unwrap();
    rs::energy_transfer_started(cp, &ctx).await.unwrap();
    rs::energy_transfer_suspended(cp, &ctx).await.unwrap();

    let events = h.csms.calls("TransactionEvent");
    let suspended = events.last().unwrap();
    assert_eq!(suspended["eventType"], "Updated");
    assert_eq!(suspended["triggerReason"], "ChargingStateChanged");
    assert_eq!(suspended["transactionInfo"]["chargingState"], "SuspendedEV");
    assert_eq!(suspended["transactionInfo"]["transactionId"], ctx.transaction_id.as_str());
    assert_eq!(suspended["seqNo"], 3);

    cp.reset_seq_no();
    let (bay, _) = rs::parking_bay_occupied(cp, 1, 2).await.unwrap();
    assert_ne!(bay.transaction_id, ctx.transaction_id);
    assert_eq!((bay.evse_id, bay.connector_id), (1, 2));
    let events = h.csms.calls("TransactionEvent");
    let detected = events.last().unwrap();
    assert_eq!(detected["triggerReason"], "EVDetected");
    assert_eq!(detected["seqNo"], 0);
    assert_eq!(detected["evse"], json!({ "id": 1, "connectorId": 2 }));
    assert_eq!(detected["transactionInfo"]["transactionId"], bay.transaction_id.as_str());
    assert!(detected.get("idToken").is_none());

    let _ = h.session.stop().await;
}
