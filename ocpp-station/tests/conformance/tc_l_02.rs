use anyhow::{ensure, Context};
use chrono::Utc;
use octt_core::v201::types::{BootReason, ConnectorStatus, FirmwareStatus, RegistrationStatus};
use octt_station::reusable_states::availability_event;

use super::{boot, config, station};
use crate::harness::harness::connect_to_csms;

/// Secure firmware update with an installation scheduled for later.
pub async fn run() -> anyhow::Result<()> {
    let config = config()?;
    let (cp, session) = connect_to_csms(&config, station(&config, "L")).await?;
    boot(&cp, &config).await?;

    let request = cp
        .received()
        .update_firmware
        .wait(config.action_timeout)
        .await
        .context("waiting for UpdateFirmwareRequest")?;
    let install_at = request
        .firmware
        .install_date_time
        .context("firmware.installDateTime must be present")?;
    ensure!(
        install_at > Utc::now(),
        "firmware.installDateTime must be in the future, got {install_at}"
    );

    let request_id = Some(request.request_id);
    for status in [
        FirmwareStatus::Downloading,
        FirmwareStatus::Downloaded,
        FirmwareStatus::SignatureVerified,
        FirmwareStatus::InstallScheduled,
        FirmwareStatus::Installing,
        FirmwareStatus::InstallRebooting,
    ] {
        cp.send_firmware_status_notification_request(status, request_id)
            .await
            .context("FirmwareStatusNotification")?;
    }

    let boot_response = cp
        .send_boot_notification_with_reason(BootReason::FirmwareUpdate)
        .await
        .context("BootNotification")?;
    ensure!(
        boot_response.status == RegistrationStatus::Accepted,
        "expected BootNotificationResponse.status=Accepted, got {:?}",
        boot_response.status
    );
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
    cp.send_firmware_status_notification_request(FirmwareStatus::Installed, request_id)
        .await
        .context("FirmwareStatusNotification")?;

    let _ = session.stop().await;
    Ok(())
}
