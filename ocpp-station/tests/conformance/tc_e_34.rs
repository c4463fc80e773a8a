use anyhow::{ensure, Context};

use super::{config, station};
use crate::harness::harness::connect_to_csms;

/// GetTransactionStatus without a transactionId, nothing queued: the answer
/// omits `ongoingIndicator`.
pub async fn run() -> anyhow::Result<()> {
    let config = config()?;
    let cp = station(&config, "E");
    cp.configure(|r| {
        r.get_transaction_status_ongoing_indicator = None;
        r.get_transaction_status_messages_in_queue = false;
    });
    let (cp, session) = connect_to_csms(&config, cp).await?;

    let request = cp
        .received()
        .get_transaction_status
        .wait(config.action_timeout)
        .await
        .context("waiting for GetTransactionStatusRequest")?;
    ensure!(
        request.transaction_id.is_none(),
        "expected no transactionId, got {:?}",
        request.transaction_id
    );

    let _ = session.stop().await;
    Ok(())
}
