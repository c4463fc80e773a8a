use anyhow::{ensure, Context};
use octt_core::v201::types::SetVariableStatus;
use octt_station::{connect, ConnectOptions};

use super::{boot, config, station};
use crate::harness::harness::connect_to_csms;

/// The CSMS rotates `SecurityCtrlr.BasicAuthPassword` and then accepts the new
/// credentials.
pub async fn run() -> anyhow::Result<()> {
    let config = config()?;
    let cp = station(&config, "A");
    cp.configure(|r| r.set_variables_status = SetVariableStatus::Accepted);
    let (cp, session) = connect_to_csms(&config, cp).await?;

    let request = cp
        .received()
        .set_variables
        .wait(config.action_timeout)
        .await
        .context("waiting for SetVariablesRequest")?;
    let data = request
        .set_variable_data
        .first()
        .context("SetVariablesRequest without setVariableData")?;
    ensure!(
        data.variable.name == "BasicAuthPassword",
        "expected variable.name=BasicAuthPassword, got {}",
        data.variable.name
    );
    ensure!(
        data.component.name == "SecurityCtrlr",
        "expected component.name=SecurityCtrlr, got {}",
        data.component.name
    );
    let password = data.attribute_value.clone();
    ensure!(!password.is_empty(), "new password must not be empty");
    log::info!("received new password (length={})", password.len());
    let _ = session.stop().await;

    let identity = cp.identity().to_string();
    let options = ConnectOptions::new(&config.csms_address, &identity).basic_auth(&identity, password);
    let (ws, _) = connect(&options).await?;
    let cp = station(&config, "A");
    let session = cp.start(ws)?;
    boot(&cp, &config).await?;

    let _ = session.stop().await;
    Ok(())
}
