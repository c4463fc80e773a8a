use anyhow::{ensure, Context};
use octt_core::v201::types::GenericStatus;

use super::{boot, config, station};
use crate::harness::harness::connect_to_csms;

/// SetMonitoringLevel with an out-of-range severity is rejected by the station.
pub async fn run() -> anyhow::Result<()> {
    let config = config()?;
    let cp = station(&config, "");
    cp.configure(|r| r.set_monitoring_level_status = GenericStatus::Rejected);
    let (cp, session) = connect_to_csms(&config, cp).await?;
    boot(&cp, &config).await?;

    let request = cp
        .received()
        .set_monitoring_level
        .wait(config.action_timeout)
        .await
        .context("waiting for SetMonitoringLevelRequest")?;
    ensure!(request.severity == 4, "expected severity=4, got {}", request.severity);

    let _ = session.stop().await;
    Ok(())
}
