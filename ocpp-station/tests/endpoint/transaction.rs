use std::{collections::BTreeMap, time::Duration};

use octt_core::v201::{
    messages::TransactionEventRequest,
    types::{IdToken, IdTokenKind, Reason, TransactionEventType, TriggerReason},
};
use octt_station::{reusable_states as rs, reusable_states::TransactionContext, Endpoint};
use serde_json::json;

use crate::harness::{
    csms::{CsmsConfig, MockCsms, VALID_ID_TOKEN},
    harness::StationHarness,
};

fn token() -> IdToken {
    IdToken::new(VALID_ID_TOKEN, IdTokenKind::Central)
}

pub async fn local_stop_ends_transaction() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;
    let cp = &h.cp;

    rs::booted(cp, 1, 1).await.unwrap();
    let ctx = TransactionContext::new(1, 1);
    rs::authorized(cp, &token(), &ctx, false).await.unwrap();
    rs::energy_transfer_started(cp, &ctx).await.unwrap();

    let ended = TransactionEventRequest::new(
        TransactionEventType::Ended,
        TriggerReason::StopAuthorized,
        cp.next_seq_no(),
        ctx.transaction().stopped_reason(Reason::Local),
    )
    .evse(ctx.evse())
    .id_token(token());
    cp.send_transaction_event_request(ended).await.unwrap();

    let events = h.csms.calls("TransactionEvent");
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["eventType"], "Started");
    assert_eq!(events[0]["triggerReason"], "Authorized");
    assert_eq!(events[2]["transactionInfo"]["chargingState"], "Charging");
    assert_eq!(events[3]["eventType"], "Ended");
    assert_eq!(events[3]["transactionInfo"]["stoppedReason"], "Local");
    assert!(events
        .iter()
        .all(|e| e["transactionInfo"]["transactionId"] == ctx.transaction_id.as_str()));

    let _ = h.session.stop().await;
}

async fn full_session(cp: &Endpoint) -> TransactionContext {
    let ctx = TransactionContext::new(1, 1);
    rs::authorized(cp, &token(), &ctx, false).await.unwrap();
    rs::energy_transfer_started(cp, &ctx).await.unwrap();
    rs::stop_authorized(cp, &token(), &ctx).await.unwrap();
    rs::ev_connected_post_session(cp, &ctx).await.unwrap();
    rs::ev_disconnected(cp, &ctx).await.unwrap();
    ctx
}

pub async fn seq_no_restarts_per_transaction() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;

    rs::booted(&h.cp, 1, 1).await.unwrap();
    let first = full_session(&h.cp).await;
    h.cp.reset_seq_no();
    let second = full_session(&h.cp).await;
    assert_ne!(first.transaction_id, second.transaction_id);

    let mut seq_nos: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    for event in h.csms.calls("TransactionEvent") {
        let id = event["transactionInfo"]["transactionId"].as_str().unwrap().to_string();
        seq_nos.entry(id).or_default().push(event["seqNo"].as_i64().unwrap());
    }
    assert_eq!(seq_nos.len(), 2);
    for seq in seq_nos.values() {
        assert_eq!(seq, &(0..=5).collect::<Vec<_>>());
    }

    let last = h.csms.calls("TransactionEvent").pop().unwrap();
    assert_eq!(last["eventType"], "Ended");
    assert_eq!(last["triggerReason"], "EVCommunicationLost");
    assert_eq!(last["transactionInfo"]["stoppedReason"], "EVDisconnected");

    let _ = h.session.stop().await;
}

pub async fn first_event_of_session_is_started() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;
    let cp = &h.cp;

    let ctx = TransactionContext::new(1, 1);
    rs::ev_connected_pre_session(cp, &ctx).await.unwrap();
    rs::authorized(cp, &token(), &ctx, true).await.unwrap();
    rs::ev_connected_pre_session(cp, &ctx).await.unwrap();

    let events = h.csms.calls("TransactionEvent");
    assert_eq!(events[0]["eventType"], "Started");
    assert_eq!(events[0]["triggerReason"], "CablePluggedIn");
    assert_eq!(events[1]["eventType"], "Updated");
    assert_eq!(events[1]["idToken"]["idToken"], VALID_ID_TOKEN);
    assert_eq!(events[2]["eventType"], "Updated");

    let status = h.csms.calls("StatusNotification");
    assert_eq!(status[0]["connectorStatus"], "Occupied");

    let _ = h.session.stop().await;
}

pub async fn rejected_authorization_fails_the_state() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;

    let ctx = TransactionContext::new(1, 1);
    let err = rs::authorized(&h.cp, &IdToken::new("nope", IdTokenKind::Iso14443), &ctx, false)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Invalid"), "{err:#}");
    assert!(h.csms.calls("TransactionEvent").is_empty());

    let _ = h.session.stop().await;
}

pub async fn csms_driven_availability_and_reservation() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;
    let wait = Duration::from_secs(5);

    let (answer, request) = tokio::join!(
        h.csms.call(
            "ChangeAvailability",
            json!({ "operationalStatus": "Inoperative", "evse": { "id": 2, "connectorId": 1 } }),
        ),
        rs::unavailable(&h.cp, wait, 1),
    );
    assert_eq!(answer.unwrap()["status"], "Accepted");
    assert_eq!(request.unwrap().evse.unwrap().id, 2);
    let status = h.csms.wait_for_call("StatusNotification").await;
    assert_eq!(status["evseId"], 2);
    assert_eq!(status["connectorStatus"], "Unavailable");

    let (answer, request) = tokio::join!(
        h.csms.call(
            "ReserveNow",
            json!({
                "id": 7,
                "expiryDateTime": "2030-01-01T00:00:00Z",
                "idToken": { "idToken": VALID_ID_TOKEN, "type": "Central" }
            }),
        ),
        rs::reserved(&h.cp, wait, 1),
    );
    assert_eq!(answer.unwrap()["status"], "Accepted");
    assert_eq!(request.unwrap().id, 7);
    let status = h.csms.calls("StatusNotification").pop().unwrap();
    assert_eq!(status["evseId"], 1);
    assert_eq!(status["connectorStatus"], "Reserved");

    let _ = h.session.stop().await;
}

pub async fn reservation_wait_times_out() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;

    let err = rs::reserved(&h.cp, Duration::from_millis(100), 1).await.unwrap_err();
    assert!(format!("{err:#}").contains("ReserveNowRequest"));

    let _ = h.session.stop().await;
}
