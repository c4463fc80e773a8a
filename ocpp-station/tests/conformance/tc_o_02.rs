use anyhow::{ensure, Context};
use octt_core::v201::types::{DisplayMessageStatus, MessageInfo, MessageState};

use super::{boot, config, station};
use crate::harness::harness::connect_to_csms;

/// The CSMS stores a display message, asks for all of them, and gets it back.
pub async fn run() -> anyhow::Result<()> {
    let config = config()?;
    let cp = station(&config, "");
    cp.configure(|r| r.set_display_message_status = DisplayMessageStatus::Accepted);
    let (cp, session) = connect_to_csms(&config, cp).await?;
    boot(&cp, &config).await?;

    let configured = cp
        .received()
        .set_display_message
        .wait(config.action_timeout)
        .await
        .context("waiting for SetDisplayMessageRequest")?
        .message;

    let request = cp
        .received()
        .get_display_messages
        .wait(config.action_timeout)
        .await
        .context("waiting for GetDisplayMessagesRequest")?;
    ensure!(request.id.is_none(), "id should be omitted, got {:?}", request.id);
    ensure!(request.priority.is_none(), "priority should be omitted, got {:?}", request.priority);
    ensure!(request.state.is_none(), "state should be omitted, got {:?}", request.state);

    let info = MessageInfo {
        state: configured.state.clone().or(Some(MessageState::Idle)),
        ..configured
    };
    cp.send_notify_display_messages(request.request_id, Some(vec![info]), None)
        .await?;

    let _ = session.stop().await;
    Ok(())
}
