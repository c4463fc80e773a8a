//! Named preconditions of the OCPP 2.0.1 test cases, composed from endpoint
//! calls. Each helper asserts the CSMS answers that the state requires.

use std::time::Duration;

use anyhow::{ensure, Context};
use chrono::Utc;
use octt_core::v201::{messages::*, types::*};

use crate::endpoint::Endpoint;

/// Identifiers threaded through the transaction states.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionContext {
    pub transaction_id: String,
    pub evse_id: i32,
    pub connector_id: i32,
}

impl TransactionContext {
    /// Context with a freshly generated transaction id.
    pub fn new(evse_id: i32, connector_id: i32) -> Self {
        Self {
            transaction_id: generate_transaction_id(),
            evse_id,
            connector_id,
        }
    }

    pub fn evse(&self) -> Evse {
        Evse::new(self.evse_id, Some(self.connector_id))
    }

    pub fn transaction(&self) -> Transaction {
        Transaction::new(&self.transaction_id)
    }

    fn event(&self, cp: &Endpoint, event_type: TransactionEventType, trigger: TriggerReason) -> TransactionEventRequest {
        TransactionEventRequest::new(event_type, trigger, cp.next_seq_no(), self.transaction()).evse(self.evse())
    }
}

pub fn generate_transaction_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// `Connector.AvailabilityState` delta event.
pub fn availability_event(evse_id: i32, connector_id: i32, status: ConnectorStatus) -> EventData {
    EventData {
        event_id: evse_id,
        timestamp: Utc::now(),
        trigger: EventTrigger::Delta,
        cause: None,
        actual_value: status.to_string(),
        tech_code: None,
        tech_info: None,
        cleared: None,
        transaction_id: None,
        component: Component::new("Connector").instance(connector_id.to_string()),
        variable_monitoring_id: None,
        event_notification_type: EventNotification::CustomMonitor,
        variable: Variable::new("AvailabilityState"),
    }
}

async fn connector_status(cp: &Endpoint, evse_id: i32, connector_id: i32, status: ConnectorStatus) -> anyhow::Result<()> {
    cp.send_status_notification(evse_id, connector_id, status.clone())
        .await
        .context("StatusNotification")?;
    cp.send_notify_event(vec![availability_event(evse_id, connector_id, status)])
        .await
        .context("NotifyEvent")?;
    Ok(())
}

fn ensure_accepted(info: Option<&IdTokenInfo>, what: &str) -> anyhow::Result<()> {
    if let Some(info) = info {
        ensure!(
            info.status == AuthorizationStatus::Accepted,
            "expected {what}.idTokenInfo.status=Accepted, got {:?}",
            info.status
        );
    }
    Ok(())
}

pub async fn booted(cp: &Endpoint, evse_id: i32, connector_id: i32) -> anyhow::Result<BootNotificationResponse> {
    let boot = cp.send_boot_notification().await.context("BootNotification")?;
    ensure!(
        boot.status == RegistrationStatus::Accepted,
        "expected BootNotificationResponse.status=Accepted, got {:?}",
        boot.status
    );
    connector_status(cp, evse_id, connector_id, ConnectorStatus::Available).await?;
    Ok(boot)
}

/// `ev_connected_pre_session` selects `Updated` over `Started`.
pub async fn authorized(
    cp: &Endpoint,
    id_token: &IdToken,
    ctx: &TransactionContext,
    ev_connected_pre_session: bool,
) -> anyhow::Result<TransactionEventResponse> {
    let response = cp
        .send_authorization_request(id_token.clone())
        .await
        .context("Authorize")?;
    ensure!(
        response.id_token_info.status == AuthorizationStatus::Accepted,
        "expected AuthorizeResponse.idTokenInfo.status=Accepted, got {:?}",
        response.id_token_info.status
    );

    let event_type = if ev_connected_pre_session {
        TransactionEventType::Updated
    } else {
        TransactionEventType::Started
    };
    let event = ctx
        .event(cp, event_type, TriggerReason::Authorized)
        .id_token(id_token.clone());
    let response = cp.send_transaction_event_request(event).await.context("TransactionEvent")?;
    ensure_accepted(response.id_token_info.as_ref(), "TransactionEventResponse")?;
    Ok(response)
}

pub async fn ev_connected_pre_session(cp: &Endpoint, ctx: &TransactionContext) -> anyhow::Result<TransactionEventResponse> {
    connector_status(cp, ctx.evse_id, ctx.connector_id, ConnectorStatus::Occupied).await?;
    let mut event = ctx.event(cp, cp.notify_event_type(), TriggerReason::CablePluggedIn);
    event.transaction_info = ctx.transaction().charging_state(ChargingState::EVConnected);
    Ok(cp.send_transaction_event_request(event).await.context("TransactionEvent")?)
}

async fn charging_state_changed(
    cp: &Endpoint,
    ctx: &TransactionContext,
    state: ChargingState,
) -> anyhow::Result<TransactionEventResponse> {
    let mut event = ctx.event(cp, TransactionEventType::Updated, TriggerReason::ChargingStateChanged);
    event.transaction_info = ctx.transaction().charging_state(state);
    Ok(cp.send_transaction_event_request(event).await.context("TransactionEvent")?)
}

/// Plugs the cable in, then starts charging.
pub async fn energy_transfer_started(cp: &Endpoint, ctx: &TransactionContext) -> anyhow::Result<TransactionEventResponse> {
    connector_status(cp, ctx.evse_id, ctx.connector_id, ConnectorStatus::Occupied).await?;
    let mut event = ctx.event(cp, TransactionEventType::Updated, TriggerReason::CablePluggedIn);
    event.transaction_info = ctx.transaction().charging_state(ChargingState::EVConnected);
    cp.send_transaction_event_request(event).await.context("TransactionEvent")?;

    charging_state_changed(cp, ctx, ChargingState::Charging).await
}

pub async fn energy_transfer_suspended(cp: &Endpoint, ctx: &TransactionContext) -> anyhow::Result<TransactionEventResponse> {
    charging_state_changed(cp, ctx, ChargingState::SuspendedEV).await
}

pub async fn stop_authorized(
    cp: &Endpoint,
    id_token: &IdToken,
    ctx: &TransactionContext,
) -> anyhow::Result<TransactionEventResponse> {
    let event = ctx
        .event(cp, TransactionEventType::Updated, TriggerReason::StopAuthorized)
        .id_token(id_token.clone());
    let response = cp.send_transaction_event_request(event).await.context("TransactionEvent")?;
    ensure_accepted(response.id_token_info.as_ref(), "TransactionEventResponse")?;
    Ok(response)
}

pub async fn ev_connected_post_session(cp: &Endpoint, ctx: &TransactionContext) -> anyhow::Result<TransactionEventResponse> {
    charging_state_changed(cp, ctx, ChargingState::EVConnected).await
}

pub async fn ev_disconnected(cp: &Endpoint, ctx: &TransactionContext) -> anyhow::Result<TransactionEventResponse> {
    connector_status(cp, ctx.evse_id, ctx.connector_id, ConnectorStatus::Available).await?;
    let mut event = ctx.event(cp, TransactionEventType::Ended, TriggerReason::EVCommunicationLost);
    event.transaction_info = ctx
        .transaction()
        .charging_state(ChargingState::Idle)
        .stopped_reason(Reason::EVDisconnected);
    Ok(cp.send_transaction_event_request(event).await.context("TransactionEvent")?)
}

/// An EV is detected on the bay; starts a fresh transaction id.
pub async fn parking_bay_occupied(
    cp: &Endpoint,
    evse_id: i32,
    connector_id: i32,
) -> anyhow::Result<(TransactionContext, TransactionEventResponse)> {
    let ctx = TransactionContext::new(evse_id, connector_id);
    let event = ctx.event(cp, TransactionEventType::Updated, TriggerReason::EVDetected);
    let response = cp.send_transaction_event_request(event).await.context("TransactionEvent")?;
    Ok((ctx, response))
}

/// Waits for the CSMS to make the connector inoperative and reports it.
pub async fn unavailable(cp: &Endpoint, timeout: Duration, connector_id: i32) -> anyhow::Result<ChangeAvailabilityRequest> {
    let request = cp
        .received()
        .change_availability
        .wait(timeout)
        .await
        .context("waiting for ChangeAvailabilityRequest")?;
    ensure!(
        request.operational_status == OperationalStatus::Inoperative,
        "expected ChangeAvailabilityRequest.operationalStatus=Inoperative, got {:?}",
        request.operational_status
    );
    let evse_id = request.evse.as_ref().map_or(1, |evse| evse.id);
    connector_status(cp, evse_id, connector_id, ConnectorStatus::Unavailable).await?;
    Ok(request)
}

/// Waits for a reservation and reports the connector as reserved.
pub async fn reserved(cp: &Endpoint, timeout: Duration, connector_id: i32) -> anyhow::Result<ReserveNowRequest> {
    let request = cp
        .received()
        .reserve_now
        .wait(timeout)
        .await
        .context("waiting for ReserveNowRequest")?;
    let evse_id = request.evse_id.unwrap_or(1);
    connector_status(cp, evse_id, connector_id, ConnectorStatus::Reserved).await?;
    Ok(request)
}
