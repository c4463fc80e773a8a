use octt_core::v201::types::{ConnectorStatus, RegistrationStatus};
use octt_station::{connect, Endpoint, EndpointError, TransportError};

use crate::harness::{
    csms::{CsmsConfig, MockCsms},
    harness::{init_logger, options, StationHarness},
};

pub async fn boot_and_status() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;

    let boot = h.cp.send_boot_notification().await.unwrap();
    assert_eq!(boot.status, RegistrationStatus::Accepted);
    let sent = h.csms.wait_for_call("BootNotification").await;
    assert_eq!(sent["reason"], "PowerUp");
    assert_eq!(sent["chargingStation"]["model"], "CP Model 1.0");
    assert_eq!(sent["chargingStation"]["vendorName"], "tzi.app");

    h.cp.send_status_notification(1, 1, ConnectorStatus::Available)
        .await
        .unwrap();
    let sent = h.csms.wait_for_call("StatusNotification").await;
    assert_eq!(sent["connectorId"], 1);
    assert_eq!(sent["evseId"], 1);
    assert_eq!(sent["connectorStatus"], "Available");

    assert!(matches!(h.session.stop().await, Err(EndpointError::Cancelled)));
}

pub async fn stop_closes_with_normal_closure() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;
    assert!(h.cp.is_running());

    let result = h.session.stop().await;
    assert!(matches!(result, Err(EndpointError::Cancelled)));
    assert_eq!(h.csms.closed().await, Some(1000));
    assert!(!h.cp.is_running());
}

pub async fn stopped_endpoint_cannot_call_or_restart() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;
    let _ = h.session.stop().await;

    let err = h.cp.send_heartbeat_request().await.unwrap_err();
    assert!(matches!(err, EndpointError::Disconnected), "{err}");

    let (ws, _) = connect(&options(&csms, "CP_1")).await.unwrap();
    assert!(matches!(h.cp.start(ws), Err(EndpointError::AlreadyStarted)));
}

pub async fn csms_close_ends_the_loop() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;
    h.csms.close().await;
    assert!(matches!(h.session.closed().await, Err(EndpointError::Disconnected)));
}

pub async fn wrong_password_is_rejected() {
    init_logger();
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let opts = options(&csms, "CP_1").basic_auth("CP_1", "not-the-password");
    let err = connect(&opts).await.err().unwrap();
    assert!(matches!(err, TransportError::Rejected { status: 401 }), "{err}");
}

pub async fn subprotocol_negotiation() {
    init_logger();
    let csms = MockCsms::start(CsmsConfig::default()).await;

    let err = connect(&options(&csms, "CP_1").subprotocols(["ocpp0.1"]))
        .await
        .err()
        .unwrap();
    assert!(err.status().is_some_and(|s| s != 101), "{err}");

    let (_ws, handshake) = connect(&options(&csms, "CP_1").subprotocols(["ocpp0.1", "ocpp2.0.1"]))
        .await
        .unwrap();
    assert_eq!(handshake.subprotocol.as_deref(), Some("ocpp2.0.1"));
    assert_eq!(csms.accept().await.subprotocol.as_deref(), Some("ocpp2.0.1"));
}

pub async fn ping_is_answered_while_idle() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;

    h.csms.ping(b"keepalive").await;
    h.csms.ping(b"again").await;

    // the frames in between are still dispatched
    let boot = h.cp.send_boot_notification().await.unwrap();
    assert_eq!(boot.status, RegistrationStatus::Accepted);
    assert!(h.cp.is_running());

    let _ = h.session.stop().await;
}
