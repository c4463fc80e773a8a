use std::time::Duration;

use anyhow::{ensure, Context};
use chrono::Utc;
use octt_core::v201::types::{ConnectorStatus, ReservationUpdateStatus};
use octt_station::reusable_states::{self as rs, availability_event};

use super::{boot, config, station};
use crate::harness::harness::connect_to_csms;

/// A reservation on a specific EVSE expires unused.
pub async fn run() -> anyhow::Result<()> {
    let config = config()?;
    let (cp, session) = connect_to_csms(&config, station(&config, "H")).await?;
    boot(&cp, &config).await?;

    let request = rs::reserved(&cp, config.action_timeout, config.connector_id).await?;
    ensure!(
        request.evse_id == Some(config.evse_id),
        "expected evseId={}, got {:?}",
        config.evse_id,
        request.evse_id
    );
    ensure!(
        request.connector_type.is_none(),
        "expected connectorType to be omitted, got {:?}",
        request.connector_type
    );
    ensure!(
        request.id_token.id_token == config.valid_id_token.id_token,
        "expected idToken={}, got {}",
        config.valid_id_token.id_token,
        request.id_token.id_token
    );

    let remaining = (request.expiry_date_time - Utc::now())
        .to_std()
        .context("expiryDateTime must be in the future")?;
    // clocks of the tool and the CSMS may drift
    let tolerance = config.transaction_duration.max(Duration::from_secs(10));
    let drift = if remaining > config.transaction_duration {
        remaining - config.transaction_duration
    } else {
        config.transaction_duration - remaining
    };
    ensure!(
        drift <= tolerance,
        "expected expiryDateTime around now+{:?}, got now+{:?}",
        config.transaction_duration,
        remaining
    );
    tokio::time::sleep(remaining + Duration::from_secs(1)).await;

    cp.send_status_notification(config.evse_id, config.connector_id, ConnectorStatus::Available)
        .await
        .context("StatusNotification")?;
    cp.send_notify_event(vec![availability_event(
        config.evse_id,
        config.connector_id,
        ConnectorStatus::Available,
    )])
    .await
    .context("NotifyEvent")?;
    cp.send_reservation_status_update(request.id, ReservationUpdateStatus::Expired)
        .await
        .context("ReservationStatusUpdate")?;

    let _ = session.stop().await;
    Ok(())
}
