use std::time::Duration;

use octt_core::v201::{
    messages::{GetTransactionStatusRequest, GetTransactionStatusResponse},
    protocol_error::ProtocolError,
    types::{Attribute, Component, ResetType, SetVariableResult, SetVariableStatus, Variable},
    Action,
};
use octt_station::{connect, Endpoint};
use serde_json::{json, Value};

use crate::harness::{
    csms::{CsmsConfig, MockCsms},
    harness::{options, StationHarness},
};

const WAIT: Duration = Duration::from_secs(5);

fn set_variable(component: &str, variable: &str, value: &str) -> Value {
    json!({
        "attributeValue": value,
        "component": { "name": component },
        "variable": { "name": variable }
    })
}

pub async fn set_variables_rejected_then_reconnect() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let cp = Endpoint::new("CP_1");
    cp.configure(|r| r.set_variables_status = SetVariableStatus::Rejected);
    let h = StationHarness::connect(&csms, cp).await;

    let answer = h
        .csms
        .call(
            "SetVariables",
            json!({ "setVariableData": [set_variable("SecurityCtrlr", "BasicAuthPassword", "new-password-123")] }),
        )
        .await
        .unwrap();
    assert_eq!(answer["setVariableResult"][0]["attributeStatus"], "Rejected");
    assert_eq!(answer["setVariableResult"][0]["component"]["name"], "SecurityCtrlr");

    let request = h.cp.received().set_variables.wait(WAIT).await.unwrap();
    assert_eq!(request.set_variable_data[0].component.name, "SecurityCtrlr");
    assert_eq!(request.set_variable_data[0].variable.name, "BasicAuthPassword");

    let _ = h.session.stop().await;

    // the password was not changed, so the original one still works
    let (ws, handshake) = connect(&options(&csms, "CP_1")).await.unwrap();
    assert_eq!(handshake.status, 101);
    let cp = Endpoint::new("CP_1");
    let session = cp.start(ws).unwrap();
    csms.accept().await;
    let _ = session.stop().await;
}

pub async fn one_result_per_item_unless_overridden() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;
    let request = json!({ "setVariableData": [
        set_variable("A", "a", "1"),
        set_variable("B", "b", "2"),
        set_variable("C", "c", "3"),
    ]});

    let answer = h.csms.call("SetVariables", request.clone()).await.unwrap();
    let results = answer["setVariableResult"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[2]["variable"]["name"], "c");
    assert!(results.iter().all(|r| r["attributeStatus"] == "Accepted"));

    let explicit = vec![SetVariableResult {
        attribute_type: Some(Attribute::Actual),
        attribute_status: SetVariableStatus::RebootRequired,
        component: Component::new("Only"),
        variable: Variable::new("One"),
        attribute_status_info: None,
    }];
    h.cp.configure(|r| r.set_variables_result = Some(explicit.clone()));
    let answer = h.csms.call("SetVariables", request).await.unwrap();
    assert_eq!(answer["setVariableResult"], serde_json::to_value(&explicit).unwrap());

    let _ = h.session.stop().await;
}

pub async fn signal_rearms_after_clear() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;
    let reset = &h.cp.received().reset;
    assert!(!reset.is_set());

    h.csms.call("Reset", json!({ "type": "OnIdle" })).await.unwrap();
    assert_eq!(reset.wait(WAIT).await.unwrap().kind, ResetType::OnIdle);

    reset.clear();
    assert!(reset.wait(Duration::from_millis(50)).await.is_err());

    h.csms.call("Reset", json!({ "type": "Immediate", "evseId": 1 })).await.unwrap();
    let second = reset.wait(WAIT).await.unwrap();
    assert_eq!(second.kind, ResetType::Immediate);
    assert_eq!(second.evse_id, Some(1));

    let _ = h.session.stop().await;
}

pub async fn rejecting_handler_answers_call_error() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let cp = Endpoint::builder("CP_1")
        .reject_with(Action::SetChargingProfile, ProtocolError::NotSupported, "smart charging not supported")
        .build();
    let h = StationHarness::connect(&csms, cp).await;

    let (code, description) = h
        .csms
        .call("SetChargingProfile", json!({ "evseId": 1, "chargingProfile": {} }))
        .await
        .unwrap_err();
    assert_eq!(code, ProtocolError::NotSupported);
    assert_eq!(description, "smart charging not supported");
    assert!(!h.cp.received().set_charging_profile.is_set());

    let _ = h.session.stop().await;
}

pub async fn unhandled_actions_are_not_implemented() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;

    let (code, _) = h
        .csms
        .call("DataTransfer", json!({ "vendorId": "com.example" }))
        .await
        .unwrap_err();
    assert_eq!(code, ProtocolError::NotImplemented);

    let (code, _) = h.csms.call("MakeCoffee", json!({})).await.unwrap_err();
    assert_eq!(code, ProtocolError::NotImplemented);

    let _ = h.session.stop().await;
}

pub async fn undecodable_request_names_the_constraint() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;

    let cases = [
        (json!({}), ProtocolError::OccurrenceConstraintViolation),
        (json!({ "type": 5 }), ProtocolError::TypeConstraintViolation),
        (json!({ "type": "Sometime" }), ProtocolError::PropertyConstraintViolation),
    ];
    for (payload, expected) in cases {
        let (code, _) = h.csms.call("Reset", payload).await.unwrap_err();
        assert_eq!(code, expected);
    }
    assert!(!h.cp.received().reset.is_set());

    let _ = h.session.stop().await;
}

pub async fn custom_handler_still_records() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let cp = Endpoint::builder("CP_1")
        .handler::<GetTransactionStatusRequest, _>(|request| {
            Ok(GetTransactionStatusResponse {
                ongoing_indicator: request.transaction_id.as_ref().map(|_| true),
                messages_in_queue: true,
            })
        })
        .build();
    let h = StationHarness::connect(&csms, cp).await;

    let answer = h
        .csms
        .call("GetTransactionStatus", json!({ "transactionId": "T-1" }))
        .await
        .unwrap();
    assert_eq!(answer, json!({ "ongoingIndicator": true, "messagesInQueue": true }));
    let request = h.cp.received().get_transaction_status.wait(WAIT).await.unwrap();
    assert_eq!(request.transaction_id.as_deref(), Some("T-1"));

    let _ = h.session.stop().await;
}

pub async fn ongoing_indicator_absent_false_true() {
    let csms = MockCsms::start(CsmsConfig::default()).await;
    let h = StationHarness::connect(&csms, Endpoint::new("CP_1")).await;

    let answer = h.csms.call("GetTransactionStatus", json!({})).await.unwrap();
    assert!(answer.get("ongoingIndicator").is_none());

    h.cp.configure(|r| r.get_transaction_status_ongoing_indicator = Some(false));
    let answer = h.csms.call("GetTransactionStatus", json!({})).await.unwrap();
    assert_eq!(answer["ongoingIndicator"], false);

    h.cp.configure(|r| r.get_transaction_status_ongoing_indicator = Some(true));
    let answer = h.csms.call("GetTransactionStatus", json!({})).await.unwrap();
    assert_eq!(answer["ongoingIndicator"], true);

    let _ = h.session.stop().await;
}
