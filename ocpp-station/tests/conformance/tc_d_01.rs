use anyhow::{ensure, Context};
use octt_core::v201::types::{SendLocalListStatus, UpdateType};
use octt_station::{Endpoint, Responses};

use super::{boot, config};
use crate::harness::harness::connect_to_csms;

/// The CSMS replaces the whole local authorization list.
pub async fn run() -> anyhow::Result<()> {
    let config = config()?;
    let cp = Endpoint::builder(config.cp_identity("D"))
        .call_timeout(config.call_timeout)
        .strict_schema(true)
        .responses(Responses {
            local_list_version: config.local_list_version,
            send_local_list_status: SendLocalListStatus::Accepted,
            ..Default::default()
        })
        .build();
    let (cp, session) = connect_to_csms(&config, cp).await?;
    boot(&cp, &config).await?;

    // a GetLocalListVersion first is optional and answered by default
    let request = cp
        .received()
        .send_local_list
        .wait(config.action_timeout)
        .await
        .context("waiting for SendLocalListRequest")?;
    ensure!(
        request.update_type == UpdateType::Full,
        "expected updateType=Full, got {:?}",
        request.update_type
    );
    ensure!(
        request.version_number > 0,
        "expected versionNumber > 0, got {}",
        request.version_number
    );
    let entries = request.local_authorization_list.unwrap_or_default();
    ensure!(!entries.is_empty(), "a Full update needs a non-empty localAuthorizationList");
    for (i, entry) in entries.iter().enumerate() {
        ensure!(
            entry.id_token_info.is_some(),
            "localAuthorizationList[{i}] ({}) has no idTokenInfo",
            entry.id_token.id_token
        );
    }
    log::info!(
        "SendLocalList Full: version {}, {} entries",
        request.version_number,
        entries.len()
    );

    let _ = session.stop().await;
    Ok(())
}
