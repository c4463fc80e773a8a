//! Scenarios against the CSMS named by `CSMS_ADDRESS`. Each `run` returns an
//! error describing the first failed tool validation.

use anyhow::{ensure, Context};
use octt_core::v201::types::{ConnectorStatus, RegistrationStatus};
use octt_station::{Endpoint, SuiteConfig};

pub mod tc_a_03;
pub mod tc_a_09;
pub mod tc_d_01;
pub mod tc_e_15;
pub mod tc_e_34;
pub mod tc_h_07;
pub mod tc_j_01;
pub mod tc_l_02;
pub mod tc_n_17;
pub mod tc_o_02;

pub fn config() -> anyhow::Result<SuiteConfig> {
    Ok(SuiteConfig::from_env()?)
}

/// Endpoint for the identity of test group `group` (`BASIC_AUTH_CP_<group>`).
/// Every CSMS reply is held to the message schema.
pub fn station(config: &SuiteConfig, group: &str) -> Endpoint {
    Endpoint::builder(config.cp_identity(group))
        .call_timeout(config.call_timeout)
        .strict_schema(true)
        .build()
}

/// BootNotification Accepted followed by the configured connector reporting Available.
pub async fn boot(cp: &Endpoint, config: &SuiteConfig) -> anyhow::Result<()> {
    let boot = cp.send_boot_notification().await.context("BootNotification")?;
    ensure!(
        boot.status == RegistrationStatus::Accepted,
        "expected BootNotificationResponse.status=Accepted, got {:?}",
        boot.status
    );
    cp.send_status_notification(config.evse_id, config.connector_id, ConnectorStatus::Available)
        .await
        .context("StatusNotification")?;
    Ok(())
}
